//! Spatial index over rectangular page objects.
//!
//! A bulk-loaded R-tree answering the two queries the extractors need:
//! candidates whose envelope intersects a probe rectangle, and objects
//! strictly contained in a probe rectangle. Built once after ingestion and
//! queried read-only afterwards.

use rstar::{RTree, RTreeObject, AABB};

use crate::error::Result;
use crate::geom::{bounding_box_of, sort_visually, HasRect, Rect};

/// Index node: stable id into the backing sequence plus the envelope.
#[derive(Clone, Debug)]
struct IndexNode {
    id: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// A bulk-loaded spatial index of rectangles.
///
/// Items are stored in insertion order; queries return references into that
/// sequence.
pub struct RectangleSpatialIndex<T> {
    items: Vec<T>,
    tree: RTree<IndexNode>,
}

impl<T: HasRect + Clone> RectangleSpatialIndex<T> {
    /// Bulk-load the index from a sequence of items.
    pub fn build(items: Vec<T>) -> Self {
        let nodes: Vec<IndexNode> = items
            .iter()
            .enumerate()
            .map(|(id, item)| {
                let r = item.rect();
                IndexNode {
                    id,
                    envelope: AABB::from_corners([r.left, r.top], [r.right(), r.bottom()]),
                }
            })
            .collect();
        Self {
            items,
            tree: RTree::bulk_load(nodes),
        }
    }

    /// All items whose envelope intersects `area`.
    pub fn intersects(&self, area: &Rect) -> Vec<&T> {
        let probe = AABB::from_corners([area.left, area.top], [area.right(), area.bottom()]);
        let mut hits: Vec<(usize, &T)> = self
            .tree
            .locate_in_envelope_intersecting(&probe)
            .map(|node| (node.id, &self.items[node.id]))
            .collect();
        hits.sort_by_key(|(id, _)| *id);
        hits.into_iter().map(|(_, item)| item).collect()
    }

    /// Items strictly contained in `area`, in visual order.
    pub fn contains(&self, area: &Rect) -> Vec<T> {
        let mut inside: Vec<T> = self
            .intersects(area)
            .into_iter()
            .filter(|item| area.contains(&item.rect()))
            .cloned()
            .collect();
        sort_visually(&mut inside);
        inside
    }

    /// The bounding box of every indexed item.
    ///
    /// Fails when the index is empty.
    pub fn bounds(&self) -> Result<Rect> {
        bounding_box_of(&self.items)
    }

    /// All indexed items in insertion order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersects_finds_overlapping() {
        let index = RectangleSpatialIndex::build(vec![
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(50.0, 50.0, 10.0, 10.0),
            Rect::new(5.0, 5.0, 10.0, 10.0),
        ]);
        let hits = index.intersects(&Rect::new(0.0, 0.0, 12.0, 12.0));
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn contains_requires_full_containment() {
        let index = RectangleSpatialIndex::build(vec![
            Rect::new(1.0, 1.0, 5.0, 5.0),
            Rect::new(1.0, 8.0, 5.0, 5.0),
            Rect::new(1.0, 1.0, 30.0, 5.0),
        ]);
        let inside = index.contains(&Rect::new(0.0, 0.0, 15.0, 15.0));
        assert_eq!(inside.len(), 2);
        // visual order: same band, left first
        assert_eq!(inside[0].left, 1.0);
        assert_eq!(inside[1].left, 8.0);
    }

    #[test]
    fn contains_on_touching_edges() {
        let index = RectangleSpatialIndex::build(vec![Rect::new(0.0, 0.0, 10.0, 10.0)]);
        assert_eq!(index.contains(&Rect::new(0.0, 0.0, 10.0, 10.0)).len(), 1);
    }

    #[test]
    fn bounds_of_empty_index_fails() {
        let index: RectangleSpatialIndex<Rect> = RectangleSpatialIndex::build(Vec::new());
        assert!(index.bounds().is_err());
        assert!(index.is_empty());
    }

    #[test]
    fn bounds_covers_everything() {
        let index = RectangleSpatialIndex::build(vec![
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(90.0, 40.0, 10.0, 10.0),
        ]);
        assert_eq!(index.bounds().unwrap(), Rect::new(0.0, 0.0, 50.0, 100.0));
    }
}
