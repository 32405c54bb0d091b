use geo::{Coord, CoordNum};

/// A component of one of the geometries passed to a distance query.
///
/// Indices count components of each kind in traversal order, with
/// collections flattened. Lines include polygon rings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Point(usize),
    Line(usize),
    Polygon(usize),
}

/// Where a nearest point was found on a geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryLocation<T: CoordNum> {
    component: Component,
    segment_index: Option<usize>,
    coord: Coord<T>,
}

impl<T: CoordNum> GeometryLocation<T> {
    /// A location on a vertex or segment of a component.
    pub fn new(component: Component, segment_index: usize, coord: Coord<T>) -> Self {
        GeometryLocation {
            component,
            segment_index: Some(segment_index),
            coord,
        }
    }

    /// A location in the interior of a polygon.
    pub fn inside_area(polygon: usize, coord: Coord<T>) -> Self {
        GeometryLocation {
            component: Component::Polygon(polygon),
            segment_index: None,
            coord,
        }
    }

    pub fn component(&self) -> Component {
        self.component
    }

    /// Index of the segment holding the location, or of the vertex for
    /// point components. `None` for locations inside an area.
    pub fn segment_index(&self) -> Option<usize> {
        self.segment_index
    }

    pub fn coord(&self) -> Coord<T> {
        self.coord
    }

    pub fn is_inside_area(&self) -> bool {
        self.segment_index.is_none()
    }
}
