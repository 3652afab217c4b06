//! Built-in coarse coastlines and land borders around the British Isles.
//!
//! Vertices are roughly a tenth of a degree apart at best; enough to orient a
//! concentration map over [`UK_EXTENT`](crate::UK_EXTENT), not for analysis.

use crate::colormap::Color;
use crate::overlay::OverlayLayer;

/// Colour of the built-in border layer.
pub const BORDER_COLOR: Color = Color::new(96, 96, 96, 255);

const GREAT_BRITAIN: &[(f64, f64)] = &[
    (1.38, 51.15),
    (1.42, 51.38),
    (0.70, 51.45),
    (0.95, 51.75),
    (1.60, 52.10),
    (1.75, 52.50),
    (1.65, 52.75),
    (1.30, 52.93),
    (0.35, 52.95),
    (0.10, 53.40),
    (-0.10, 54.10),
    (-0.60, 54.50),
    (-1.20, 54.65),
    (-1.55, 55.25),
    (-1.80, 55.70),
    (-2.10, 55.90),
    (-2.55, 56.05),
    (-3.20, 56.00),
    (-2.60, 56.30),
    (-2.50, 56.70),
    (-2.05, 57.10),
    (-1.80, 57.50),
    (-2.20, 57.68),
    (-3.50, 57.65),
    (-4.20, 57.55),
    (-3.80, 57.85),
    (-3.05, 58.40),
    (-3.10, 58.65),
    (-5.00, 58.62),
    (-5.20, 58.20),
    (-5.70, 57.80),
    (-5.60, 57.30),
    (-5.90, 56.80),
    (-5.60, 56.35),
    (-5.70, 55.35),
    (-4.90, 55.75),
    (-4.60, 55.50),
    (-5.00, 55.00),
    (-4.85, 54.65),
    (-4.40, 54.85),
    (-3.60, 54.90),
    (-3.40, 54.55),
    (-3.10, 54.10),
    (-2.90, 53.80),
    (-3.05, 53.40),
    (-3.10, 53.30),
    (-4.20, 53.30),
    (-4.60, 52.85),
    (-4.10, 52.60),
    (-4.15, 52.30),
    (-4.70, 52.10),
    (-5.25, 51.85),
    (-4.90, 51.65),
    (-4.25, 51.55),
    (-3.20, 51.45),
    (-2.70, 51.60),
    (-3.40, 51.20),
    (-4.20, 51.20),
    (-4.70, 51.00),
    (-5.10, 50.55),
    (-5.70, 50.06),
    (-5.20, 49.96),
    (-4.20, 50.35),
    (-3.65, 50.22),
    (-3.45, 50.60),
    (-2.45, 50.60),
    (-1.95, 50.60),
    (-1.30, 50.77),
    (-0.80, 50.73),
    (0.25, 50.74),
    (0.95, 50.92),
    (1.38, 51.15),
];

const IRELAND: &[(f64, f64)] = &[
    (-6.15, 55.22),
    (-5.85, 54.65),
    (-5.45, 54.45),
    (-6.10, 54.00),
    (-6.25, 53.70),
    (-6.05, 53.30),
    (-6.00, 52.95),
    (-6.35, 52.20),
    (-7.00, 52.15),
    (-8.20, 51.80),
    (-9.80, 51.45),
    (-10.20, 51.80),
    (-9.90, 52.60),
    (-9.40, 53.10),
    (-10.10, 53.50),
    (-9.90, 54.20),
    (-8.60, 54.30),
    (-8.50, 54.70),
    (-8.20, 55.15),
    (-7.30, 55.30),
    (-6.15, 55.22),
];

const ISLE_OF_MAN: &[(f64, f64)] = &[
    (-4.80, 54.05),
    (-4.35, 54.25),
    (-4.35, 54.40),
    (-4.75, 54.30),
    (-4.80, 54.05),
];

/// Cotentin to the Scheldt.
const CONTINENT: &[(f64, f64)] = &[
    (-1.95, 49.72),
    (-1.25, 49.68),
    (-1.10, 49.38),
    (-0.20, 49.30),
    (0.10, 49.45),
    (0.20, 49.70),
    (1.10, 49.95),
    (1.60, 50.20),
    (1.60, 50.75),
    (1.85, 50.95),
    (2.35, 51.05),
    (3.00, 51.30),
    (3.40, 51.40),
];

const NORTHERN_IRELAND: &[(f64, f64)] = &[
    (-7.25, 55.05),
    (-7.55, 54.75),
    (-8.15, 54.45),
    (-7.60, 54.15),
    (-7.00, 54.25),
    (-6.60, 54.05),
    (-6.27, 54.10),
];

const ENGLAND_SCOTLAND: &[(f64, f64)] = &[
    (-3.05, 54.98),
    (-2.65, 55.15),
    (-2.20, 55.40),
    (-2.05, 55.78),
];

const ENGLAND_WALES: &[(f64, f64)] = &[
    (-3.05, 53.25),
    (-2.90, 53.00),
    (-3.10, 52.50),
    (-3.05, 52.05),
    (-2.65, 51.62),
];

const FRANCE_BELGIUM: &[(f64, f64)] = &[
    (2.55, 51.09),
    (2.95, 50.75),
    (3.65, 50.45),
    (4.20, 50.25),
];

fn layer(name: &str, color: Color, parts: &[&[(f64, f64)]]) -> OverlayLayer {
    OverlayLayer::new(name, color, parts.iter().map(|p| p.to_vec()).collect())
}

/// Coastlines of Great Britain, Ireland, the Isle of Man and the Channel
/// coast of the continent, in black.
pub fn coastlines() -> OverlayLayer {
    layer(
        "coastlines",
        Color::BLACK,
        &[GREAT_BRITAIN, IRELAND, ISLE_OF_MAN, CONTINENT],
    )
}

/// Land borders within the British Isles plus France-Belgium.
pub fn borders() -> OverlayLayer {
    layer(
        "borders",
        BORDER_COLOR,
        &[NORTHERN_IRELAND, ENGLAND_SCOTLAND, ENGLAND_WALES, FRANCE_BELGIUM],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concentration_map::UK_EXTENT;

    #[test]
    fn test_coastline_rings_are_closed() {
        for ring in [GREAT_BRITAIN, IRELAND, ISLE_OF_MAN] {
            assert_eq!(ring.first(), ring.last());
        }
    }

    #[test]
    fn test_layers_reach_uk_extent() {
        let [west, east, south, north] = UK_EXTENT;
        for layer in [coastlines(), borders()] {
            let inside = layer
                .lines()
                .iter()
                .flatten()
                .filter(|(x, y)| *x >= west && *x <= east && *y >= south && *y <= north)
                .count();
            assert!(inside > 0, "{} has no vertex on the map", layer.name);
        }
    }
}
