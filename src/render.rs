//! # Render
//!
//! SVG drawing of a tour for quick inspection. Only x and y are drawn.
//! Zoom, pan and animation progress live in an explicit [`ViewState`].

use crate::city::City;
use simplesvg::{Attr, Color, ColorAttr, Fig, Svg};

/// tableau palette, cycled by edge index
const COLORS: [(u8, u8, u8); 10] = [
    (0x1f, 0x77, 0xb4),
    (0xff, 0x7f, 0x0e),
    (0x2c, 0xa0, 0x2c),
    (0xd6, 0x27, 0x28),
    (0x94, 0x67, 0xbd),
    (0x8c, 0x56, 0x4b),
    (0xe3, 0x77, 0xc2),
    (0x7f, 0x7f, 0x7f),
    (0xbc, 0xbd, 0x22),
    (0x17, 0xbe, 0xcf),
];

fn edge_color(index: usize) -> ColorAttr {
    let (r, g, b) = COLORS[index % COLORS.len()];
    Color(r, g, b)
}

const MARGIN: f64 = 10.;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// draw only cities `0..=frame`
    pub frame: Option<usize>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            zoom: 1.,
            offset_x: 0.,
            offset_y: 0.,
            frame: None,
        }
    }
}

impl ViewState {
    /// Zoom around the cursor at (`x`, `y`) in data coordinates
    pub fn scroll(&mut self, up: bool, x: f64, y: f64) {
        let factor = if up { 1.1 } else { 0.9 };
        self.zoom *= factor;
        self.offset_x = x - (x - self.offset_x) * factor;
        self.offset_y = y - (y - self.offset_y) * factor;
    }

    /// Step the animation one city further, stopping at the end of the tour
    pub fn advance(&mut self, tour_len: usize) {
        let last = tour_len.saturating_sub(1);
        self.frame = Some(match self.frame {
            Some(frame) => (frame + 1).min(last),
            None => 0,
        });
    }

    fn visible<'a, 'b>(&self, tour: &'b [&'a City]) -> &'b [&'a City] {
        match self.frame {
            Some(frame) => &tour[..frame.saturating_add(1).min(tour.len())],
            None => tour,
        }
    }
}

struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    fn of(cities: &[&City]) -> Bounds {
        cities.iter().fold(
            Bounds {
                min_x: f64::MAX,
                min_y: f64::MAX,
                max_x: f64::MIN,
                max_y: f64::MIN,
            },
            |acc, city| Bounds {
                min_x: acc.min_x.min(city.x()),
                min_y: acc.min_y.min(city.y()),
                max_x: acc.max_x.max(city.x()),
                max_y: acc.max_y.max(city.y()),
            },
        )
    }
}

/// Render `tour` as an SVG document of `width` x `height` pixels
pub fn render_svg(tour: &[&City], view: &ViewState, width: u32, height: u32) -> String {
    let mut figs = vec![Fig::Rect(0., 0., width as f32, height as f32)
        .styled(Attr::default().fill(Color(0, 0, 0)))];
    let cities = view.visible(tour);
    if cities.is_empty() {
        return Svg(figs, width, height).to_string();
    }
    let bounds = Bounds::of(cities);
    let span_x = (bounds.max_x - bounds.min_x).max(f64::EPSILON);
    let span_y = (bounds.max_y - bounds.min_y).max(f64::EPSILON);
    let scale = ((width as f64 - 2. * MARGIN) / span_x).min((height as f64 - 2. * MARGIN) / span_y) * view.zoom;
    let project = |x: f64, y: f64| -> (f32, f32) {
        (
            (MARGIN + (x + view.offset_x - bounds.min_x) * scale) as f32,
            (height as f64 - MARGIN - (y + view.offset_y - bounds.min_y) * scale) as f32,
        )
    };

    let (x1, y1) = project(bounds.min_x, bounds.min_y);
    let (x2, y2) = project(bounds.max_x, bounds.max_y);
    figs.push(
        Fig::Rect(x1.min(x2), y1.min(y2), (x2 - x1).abs(), (y2 - y1).abs())
            .styled(Attr::default().stroke(Color(0xff, 0xff, 0xff)).stroke_width(1.)),
    );

    for (index, pair) in cities.windows(2).enumerate() {
        let (x1, y1) = project(pair[0].x(), pair[0].y());
        let (x2, y2) = project(pair[1].x(), pair[1].y());
        figs.push(
            Fig::Line(x1, y1, x2, y2)
                .styled(Attr::default().stroke(edge_color(index + 1)).stroke_width(1.)),
        );
    }
    for city in cities {
        let (x, y) = project(city.x(), city.y());
        figs.push(Fig::Circle(x, y, 2.).styled(Attr::default().fill(Color(0xff, 0xff, 0xff))));
    }
    Svg(figs, width, height).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn scroll_zooms_around_cursor() {
        let mut view = ViewState::default();
        view.scroll(true, 10., 0.);
        assert!(approx_eq!(f64, view.zoom, 1.1, ulps = 2));
        assert!(approx_eq!(f64, view.offset_x, -1., epsilon = 1e-12));
        view.scroll(false, 10., 0.);
        assert!(approx_eq!(f64, view.zoom, 0.99, epsilon = 1e-12));
    }

    #[test]
    fn advance_stops_at_end() {
        let mut view = ViewState::default();
        view.advance(3);
        assert_eq!(view.frame, Some(0));
        view.advance(3);
        view.advance(3);
        view.advance(3);
        assert_eq!(view.frame, Some(2));
    }

    #[test]
    fn frame_limits_drawn_edges() {
        let cities = vec![City::new(0., 0.), City::new(1., 0.), City::new(1., 1.)];
        let tour: Vec<&City> = cities.iter().chain(cities.first()).collect();
        let full = render_svg(&tour, &ViewState::default(), 200, 100);
        let view = ViewState {
            frame: Some(1),
            ..Default::default()
        };
        let partial = render_svg(&tour, &view, 200, 100);
        assert_eq!(full.matches("<line").count(), 3);
        assert_eq!(partial.matches("<line").count(), 1);
        assert_eq!(partial.matches("<circle").count(), 2);
    }

    #[test]
    fn huge_frame_draws_whole_tour() {
        let cities = vec![City::new(0., 0.), City::new(1., 0.)];
        let tour: Vec<&City> = cities.iter().chain(cities.first()).collect();
        let view = ViewState {
            frame: Some(usize::MAX),
            ..Default::default()
        };
        let svg = render_svg(&tour, &view, 100, 100);
        assert_eq!(svg.matches("<line").count(), 2);
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(format!("{:?}", edge_color(1)), format!("{:?}", edge_color(11)));
        assert_ne!(format!("{:?}", edge_color(1)), format!("{:?}", edge_color(2)));
    }

    #[test]
    fn empty_tour_draws_background() {
        let svg = render_svg(&[], &ViewState::default(), 50, 50);
        assert!(svg.contains("<svg"));
        assert_eq!(svg.matches("<line").count(), 0);
    }
}
