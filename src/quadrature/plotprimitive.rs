use serde::Serialize;

use crate::math::curve::point2d::Point2D;

/// Where a bar sits relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarAlignment {
    /// The bar starts at the anchor and extends by `width`, which may be
    /// negative to draw leftwards.
    Edge,
    /// The bar is centered on the anchor.
    Center
}

/// Shape describing one piece of an approximation, for plotting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlotPrimitive {
    Bar {
        anchor_x: f64,
        height: f64,
        width: f64,
        alignment: BarAlignment
    },
    /// Vertices `(x_i, 0), (x_i, f(x_i)), (x_{i+1}, f(x_{i+1})), (x_{i+1}, 0)`.
    Trapezoid {
        vertices: [Point2D; 4]
    },
    /// Dense sampling of the quadratic fitted through one Simpson panel.
    Parabola {
        points: Vec<Point2D>
    }
}

impl PlotPrimitive {
    pub fn bar(anchor_x: f64, height: f64, width: f64, alignment: BarAlignment) -> PlotPrimitive {
        PlotPrimitive::Bar { anchor_x, height, width, alignment }
    }

    pub fn trapezoid(x0: f64, y0: f64, x1: f64, y1: f64) -> PlotPrimitive {
        PlotPrimitive::Trapezoid {
            vertices: [
                Point2D::on_axis(x0),
                Point2D::new(x0, y0),
                Point2D::new(x1, y1),
                Point2D::on_axis(x1)
            ]
        }
    }

    /// Horizontal extent `(min_x, max_x)` covered by the shape.
    pub fn extent(&self) -> (f64, f64) {
        let (lo, hi) = match self {
            PlotPrimitive::Bar { anchor_x, width, alignment: BarAlignment::Edge, .. } => {
                (*anchor_x, anchor_x + width)
            },
            PlotPrimitive::Bar { anchor_x, width, alignment: BarAlignment::Center, .. } => {
                (anchor_x - width / 2.0, anchor_x + width / 2.0)
            },
            PlotPrimitive::Trapezoid { vertices } => (vertices[0].x(), vertices[3].x()),
            PlotPrimitive::Parabola { points } => match (points.first(), points.last()) {
                (Some(first), Some(last)) => (first.x(), last.x()),
                _ => (f64::NAN, f64::NAN)
            }
        };
        (lo.min(hi), lo.max(hi))
    }
}
