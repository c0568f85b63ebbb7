//! Coverage of a (cone, clock) grid by a mounted star-shaped footprint.
//!
//! Usage:
//!   cargo run -p fovcheck --example cap_coverage -- [grid_step_deg] [seed]
//!
//! Prints the fraction of grid directions seen by the sensor, per accelerator,
//! and checks that all three agree.

use fovcheck::prelude::*;
use nalgebra::Rotation3;

fn main() {
    let mut args = std::env::args().skip(1);
    let step: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(5.0);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(2025);

    let star = draw_star(
        StarCfg::default(),
        ConeClock::new(0.0, 0.0),
        ReplayToken::new(seed, 0),
    );
    // Sensor boresight tilted 30° off body +Z.
    let mount = *Rotation3::from_axis_angle(&Vec3::y_axis(), 30f64.to_radians()).matrix();

    let mut grid = Vec::new();
    let mut cone = 0.0;
    while cone <= 180.0 {
        let mut clock = 0.0;
        while clock < 360.0 {
            grid.push(ConeClock::from_degrees(cone, clock).to_unit());
            clock += step;
        }
        cone += step;
    }

    let mut reference: Option<Vec<Containment>> = None;
    for (name, kind) in [
        ("none", None),
        ("slice-array", Some(AcceleratorKind::SliceArray)),
        ("slice-tree", Some(AcceleratorKind::slice_tree())),
    ] {
        let fov = match FieldOfView::from_boundary(&star.cone_clock(), mount, kind) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("footprint rejected: {e}");
                return;
            }
        };
        let seen = fov.par_sees_many(&grid);
        let inside = seen.iter().filter(|c| c.is_inside()).count();
        let boundary = seen.iter().filter(|c| c.is_boundary()).count();
        println!(
            "{name:>12}: {inside}/{} inside ({:.2}%), {boundary} on boundary",
            grid.len(),
            100.0 * inside as f64 / grid.len() as f64
        );
        match &reference {
            None => reference = Some(seen),
            Some(r) if *r != seen => eprintln!("{name}: results differ from unaccelerated scan"),
            Some(_) => {}
        }
    }
}
