use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter},
    path::Path,
};

use crate::{
    error::{Error, Result},
    models::coordinates::{CoordinateSet, Point},
    settings::GenerateSettings,
};

// The format is chosen by file extension
pub fn load(path: &Path) -> Result<CoordinateSet> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("tsp") => parse_tsplib(&fs::read_to_string(path)?, path),
        Some("txt") => parse_plain(&fs::read_to_string(path)?, path),
        Some("dat") => {
            let reader = BufReader::new(File::open(path)?);
            Ok(bincode::deserialize_from(reader)?)
        }
        _ => Err(Error::invalid_input(format!(
            "unsupported coordinate file {}, expected .tsp, .txt or .dat",
            path.display()
        ))),
    }
}

pub fn save(coords: &CoordinateSet, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(writer, coords)?;

    Ok(())
}

/**
 * TSPLIB node coordinates. Every line after `NODE_COORD_SECTION` is `id x y`, up to
 * `EOF` or the first blank line. Header fields are ignored.
 */
pub fn parse_tsplib(content: &str, path: &Path) -> Result<CoordinateSet> {
    let mut points = Vec::new();
    let mut in_node_section = false;

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();

        if !in_node_section {
            if line == "NODE_COORD_SECTION" {
                in_node_section = true;
            }
            continue;
        }

        if line == "EOF" || line.is_empty() {
            break;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 3 {
            return Err(Error::parse(
                path,
                line_num + 1,
                format!("expected `id x y`, got `{}`", line),
            ));
        }

        let x = parse_coord(parts[1], path, line_num)?;
        let y = parse_coord(parts[2], path, line_num)?;
        points.push(Point::new(x, y));
    }

    if !in_node_section {
        return Err(Error::invalid_input(format!(
            "{} has no NODE_COORD_SECTION",
            path.display()
        )));
    }

    Ok(CoordinateSet::new(points))
}

/**
 * Plain coordinates: the point count on the first line, then one `x y` pair per line.
 */
pub fn parse_plain(content: &str, path: &Path) -> Result<CoordinateSet> {
    let mut lines = content.lines().enumerate();

    let count = match lines.next() {
        Some((_, line)) => line
            .trim()
            .parse::<usize>()
            .map_err(|_| Error::parse(path, 1, format!("invalid point count `{}`", line.trim())))?,
        None => return Err(Error::parse(path, 1, "missing point count")),
    };

    let mut points = Vec::with_capacity(count);

    for _ in 0..count {
        let (line_num, line) = lines.next().ok_or_else(|| {
            Error::parse(
                path,
                points.len() + 2,
                format!("expected {} points, found {}", count, points.len()),
            )
        })?;

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 2 {
            return Err(Error::parse(
                path,
                line_num + 1,
                format!("expected `x y`, got `{}`", line.trim()),
            ));
        }

        let x = parse_coord(parts[0], path, line_num)?;
        let y = parse_coord(parts[1], path, line_num)?;
        points.push(Point::new(x, y));
    }

    Ok(CoordinateSet::new(points))
}

/**
 * Clustered random instance: uniformly placed centres with normally distributed points
 * around them.
 */
pub fn generate<R: Rng + ?Sized>(settings: &GenerateSettings, rng: &mut R) -> Result<CoordinateSet> {
    if settings.num_clusters == 0 {
        return Err(Error::invalid_parameter("need at least one cluster"));
    }

    if !(settings.width > 0.0) {
        return Err(Error::invalid_parameter(format!(
            "width must be positive, got {}",
            settings.width
        )));
    }

    let offset_distr = Normal::new(0.0, settings.spread).map_err(|err| {
        Error::invalid_parameter(format!("invalid spread {}: {:?}", settings.spread, err))
    })?;

    let centres: Vec<Point> = (0..settings.num_clusters)
        .map(|_| {
            Point::new(
                rng.gen_range(0.0, settings.width),
                rng.gen_range(0.0, settings.width),
            )
        })
        .collect();

    let points = (0..settings.num_points)
        .map(|_| {
            let centre = centres[rng.gen_range(0, centres.len())];
            let dx: f64 = offset_distr.sample(rng);
            let dy: f64 = offset_distr.sample(rng);

            Point::new(centre.x + dx, centre.y + dy)
        })
        .collect();

    Ok(CoordinateSet::new(points))
}

fn parse_coord(value: &str, path: &Path, line_num: usize) -> Result<f64> {
    value
        .parse()
        .map_err(|_| Error::parse(path, line_num + 1, format!("invalid coordinate `{}`", value)))
}
