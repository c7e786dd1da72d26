extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate image;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;
extern crate smoothbrot;

use clap::{App, Arg, ArgMatches};
use failure::Error;
use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use num::Complex;
use smoothbrot::{render_frame, AffineTransform, Argb, Frame, LogTables, Palette, RenderParams};
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_color(s: &str) -> Result<(), String> {
    Argb::from_hex(s).map(|_| ()).map_err(|e| e.to_string())
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";
const ESCAPE: &str = "escape";
const OFFSET: &str = "offset";
const BLOCK: &str = "block";
const SMOOTH: &str = "smooth";
const LOOKUP: &str = "lookup";
const FROM: &str = "from";
const TO: &str = "to";
const INTERIOR: &str = "interior";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("smoothbrot")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Smooth-colored Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (binary PPM)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.5,-1.25")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the mandelbrot space"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1.0,1.25")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the mandelbrot space"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("256")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        100_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 100000",
                    )
                })
                .help("Maximum iterations per point"),
        )
        .arg(
            Arg::with_name(ESCAPE)
                .required(false)
                .long(ESCAPE)
                .short("e")
                .takes_value(true)
                .default_value("4.0")
                .validator(move |s| {
                    validate_range(
                        &s,
                        ::std::f64::MIN_POSITIVE,
                        ::std::f64::MAX,
                        "Could not parse escape radius",
                        "Escape radius squared must be positive",
                    )
                })
                .help("Squared escape radius"),
        )
        .arg(
            Arg::with_name(OFFSET)
                .required(false)
                .long(OFFSET)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0")
                .validator(move |s| {
                    validate_range(
                        &s,
                        ::std::i64::MIN / 2,
                        ::std::i64::MAX / 2,
                        "Could not parse color offset",
                        "Color offset out of range",
                    )
                })
                .help("Rotate the palette by this many entries"),
        )
        .arg(
            Arg::with_name(BLOCK)
                .required(false)
                .long(BLOCK)
                .short("b")
                .takes_value(true)
                .default_value("64")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        4096,
                        "Could not parse block size",
                        "Block size must be between 1 and 4096",
                    )
                })
                .help("Edge length of the square blocks handed to workers"),
        )
        .arg(
            Arg::with_name(SMOOTH)
                .long(SMOOTH)
                .help("Blend between palette entries instead of banding"),
        )
        .arg(
            Arg::with_name(LOOKUP)
                .long(LOOKUP)
                .requires(SMOOTH)
                .help("Use lookup tables instead of exact logarithms"),
        )
        .arg(
            Arg::with_name(FROM)
                .long(FROM)
                .takes_value(true)
                .default_value("#000764")
                .validator(|s| validate_color(&s))
                .help("Palette color for the fastest escapes"),
        )
        .arg(
            Arg::with_name(TO)
                .long(TO)
                .takes_value(true)
                .default_value("#FFAA00")
                .validator(|s| validate_color(&s))
                .help("Palette color for the slowest escapes"),
        )
        .arg(
            Arg::with_name(INTERIOR)
                .long(INTERIOR)
                .takes_value(true)
                .default_value("#000000")
                .validator(|s| validate_color(&s))
                .help("Color of points inside the set"),
        )
        .get_matches()
}

fn write_image(outfile: &str, pixels: &[u8], bounds: (usize, usize)) -> Result<(), Error> {
    let path = Path::new(outfile);
    let output = File::create(&path)?;
    let mut encoder =
        PNMEncoder::new(output).with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
    encoder.encode(pixels, bounds.0 as u32, bounds.1 as u32, ColorType::RGB(8))?;
    Ok(())
}

// Every value has passed its validator by now, so the
// unreachable! arms only fire on a clap bug.
fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> T {
    match matches.value_of(name).map(T::from_str) {
        Some(Ok(v)) => v,
        _ => unreachable!("clap validated {}", name),
    }
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let image_size: (usize, usize) = match matches.value_of(SIZE).and_then(|s| parse_pair(s, 'x')) {
        Some(size) => size,
        None => unreachable!("clap validated {}", SIZE),
    };
    let corners = (
        matches.value_of(LEFTLOWER).and_then(parse_complex),
        matches.value_of(RIGHTUPPER).and_then(parse_complex),
    );
    let (leftlower, rightupper) = match corners {
        (Some(l), Some(r)) => (l, r),
        _ => unreachable!("clap validated the corners"),
    };

    let iterations: usize = value(matches, ITERATIONS);
    let threads: usize = value(matches, THREADS);
    let block: usize = value(matches, BLOCK);

    let params = RenderParams::new(iterations)
        .escape_radius_squared(value(matches, ESCAPE))
        .color_offset(value(matches, OFFSET))
        .smooth_colors(matches.is_present(SMOOTH))
        .use_log2_lookup(matches.is_present(LOOKUP));

    let palette = Palette::ramp(
        iterations,
        Argb::from_hex(matches.value_of(FROM).unwrap_or_default())?,
        Argb::from_hex(matches.value_of(TO).unwrap_or_default())?,
        Argb::from_hex(matches.value_of(INTERIOR).unwrap_or_default())?,
    )?;

    let plane = AffineTransform::from_corners(image_size.0, image_size.1, leftlower, rightupper)?;
    let mut frame = Frame::new(image_size.0, image_size.1)?;

    let started = Instant::now();
    let tables = LogTables::new();
    let computed = render_frame(&mut frame, &plane, &params, &palette, &tables, block, threads)?;
    let elapsed = started.elapsed();
    info!(
        "Rendered {} pixels in {}.{:03}s on {} threads",
        computed,
        elapsed.as_secs(),
        elapsed.subsec_millis(),
        threads
    );

    let outfile = matches.value_of(OUTPUT).unwrap_or_default();
    write_image(outfile, &frame.to_rgb8(), (frame.width(), frame.height()))?;
    info!("Wrote {}", outfile);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
