use anyhow::{bail, Result};
use memlane_core::carousel::normalize_index;
use memlane_core::config::CarouselStyle;

pub fn run(style: CarouselStyle, count: usize, position: f64) -> Result<()> {
    if count == 0 {
        bail!("count must be at least 1");
    }
    if !position.is_finite() {
        bail!("position must be a finite number");
    }

    let projector = style.projector();
    println!(
        "{} carousel, {} cards, position {} (focused card {})\n",
        style.name(),
        count,
        position,
        normalize_index(position, count) + 1
    );
    println!(
        "{:>4} {:>7} {:>8} {:>8} {:>8} {:>7} {:>6} {:>7} {:>5} {:>4}",
        "card", "diff", "x", "y", "depth", "rotate", "scale", "opacity", "blur", "z"
    );

    // Front to back
    let mut layouts = projector.project_all(position, count);
    layouts.reverse();
    for (index, l) in layouts {
        println!(
            "{:>4} {:>7.3} {:>8.1} {:>8.1} {:>8.1} {:>7.1} {:>6.3} {:>7.3} {:>5.2} {:>4}",
            index + 1,
            l.diff,
            l.offset_x,
            l.offset_y,
            l.depth,
            l.rotation_deg,
            l.scale,
            l.opacity,
            l.blur,
            l.z_index
        );
    }

    Ok(())
}
