use super::{DrawCmd, SortKey, ZIndex};

/// A recorded command and where it sits in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// One frame's draw commands.
///
/// Items are kept in push order until someone asks for paint order; the sort
/// then happens in place, once per batch of pushes.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,
    sorted: bool,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties the list, keeping its allocation.
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted = true;
    }

    /// Items as currently stored: push order until the first paint-order walk.
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let key = SortKey::new(z, self.next_order);
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem { key, cmd });
        self.sorted = false;
    }

    /// Back to front: ascending z, push order within a layer.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if !self.sorted {
            self.items.sort_unstable_by_key(|item| item.key);
            self.sorted = true;
        }
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::paint::Color;

    fn order_of(list: &mut DrawList) -> Vec<f32> {
        // Identify items by the x coordinate they were pushed with.
        list.iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::Box(b) => b.rect.origin.x,
                DrawCmd::Disk(d) => d.center.x,
                DrawCmd::Glow(g) => g.center.x,
            })
            .collect()
    }

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let mut list = DrawList::new();
        let c = Color::black();

        list.push_box(ZIndex::new(2), Rect::new(1.0, 0.0, 10.0, 10.0), 0.0, c);
        list.push_box(ZIndex::new(0), Rect::new(2.0, 0.0, 10.0, 10.0), 0.0, c);
        list.push_disk(ZIndex::new(2), Vec2::new(3.0, 0.0), 5.0, c, None);
        list.push_disk(ZIndex::new(1), Vec2::new(4.0, 0.0), 5.0, c, None);

        assert_eq!(order_of(&mut list), vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn clear_resets_items_and_order() {
        let mut list = DrawList::new();
        list.push_box(ZIndex::new(5), Rect::new(1.0, 0.0, 1.0, 1.0), 0.0, Color::black());
        list.clear();
        assert!(list.is_empty());

        list.push_box(ZIndex::new(0), Rect::new(7.0, 0.0, 1.0, 1.0), 0.0, Color::black());
        assert_eq!(list.items()[0].key, SortKey::new(ZIndex::new(0), 0));
        assert_eq!(order_of(&mut list), vec![7.0]);
    }
}
