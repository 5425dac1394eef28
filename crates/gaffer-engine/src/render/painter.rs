use std::ops::Range;

use crate::scene::{DrawCmd, DrawList};

use super::shapes::boxes::BoxRenderer;
use super::shapes::disk::DiskRenderer;
use super::shapes::glow::GlowRenderer;
use super::{RenderCtx, RenderTarget};

/// Which shape renderer handles a draw command.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShapeKind {
    Box,
    Disk,
    Glow,
}

impl ShapeKind {
    #[inline]
    pub fn of(cmd: &DrawCmd) -> Self {
        match cmd {
            DrawCmd::Box(_) => ShapeKind::Box,
            DrawCmd::Disk(_) => ShapeKind::Disk,
            DrawCmd::Glow(_) => ShapeKind::Glow,
        }
    }
}

/// Consecutive draw items of one kind, as a range into that kind's prepared
/// instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintRun {
    pub kind: ShapeKind,
    pub range: Range<u32>,
}

/// Splits the paint order of `draw_list` into same-kind runs.
pub fn paint_runs(draw_list: &mut DrawList) -> Vec<PaintRun> {
    let mut runs: Vec<PaintRun> = Vec::new();
    let (mut boxes, mut disks, mut glows) = (0u32, 0u32, 0u32);

    for item in draw_list.iter_in_paint_order() {
        let kind = ShapeKind::of(&item.cmd);
        let counter = match kind {
            ShapeKind::Box => &mut boxes,
            ShapeKind::Disk => &mut disks,
            ShapeKind::Glow => &mut glows,
        };
        let index = *counter;
        *counter += 1;

        match runs.last_mut() {
            Some(run) if run.kind == kind => run.range.end = index + 1,
            _ => runs.push(PaintRun { kind, range: index..index + 1 }),
        }
    }

    runs
}

/// Draws a mixed draw list in one pass, honoring paint order across shape kinds.
#[derive(Default)]
pub struct ShapePainter {
    boxes: BoxRenderer,
    disks: DiskRenderer,
    glow: GlowRenderer,
}

impl ShapePainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paint(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        let runs = paint_runs(draw_list);
        if runs.is_empty() {
            return;
        }

        self.boxes.prepare(ctx, draw_list);
        self.disks.prepare(ctx, draw_list);
        self.glow.prepare(ctx, draw_list);

        let mut rpass = target.load_pass("gaffer shape pass");
        for run in runs {
            match run.kind {
                ShapeKind::Box => self.boxes.draw(&mut rpass, run.range),
                ShapeKind::Disk => self.disks.draw(&mut rpass, run.range),
                ShapeKind::Glow => self.glow.draw(&mut rpass, run.range),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::paint::Color;
    use crate::scene::ZIndex;

    fn push_box(list: &mut DrawList, z: i32) {
        list.push_box(ZIndex::new(z), Rect::new(0.0, 0.0, 10.0, 10.0), 0.0, Color::black());
    }

    fn push_disk(list: &mut DrawList, z: i32) {
        list.push_disk(ZIndex::new(z), Vec2::new(0.0, 0.0), 5.0, Color::black(), None);
    }

    #[test]
    fn empty_list_has_no_runs() {
        assert!(paint_runs(&mut DrawList::new()).is_empty());
    }

    #[test]
    fn consecutive_items_of_a_kind_share_a_run() {
        let mut list = DrawList::new();
        push_box(&mut list, 0);
        push_box(&mut list, 0);
        push_disk(&mut list, 0);

        assert_eq!(
            paint_runs(&mut list),
            vec![
                PaintRun { kind: ShapeKind::Box, range: 0..2 },
                PaintRun { kind: ShapeKind::Disk, range: 0..1 },
            ]
        );
    }

    #[test]
    fn raised_box_is_drawn_after_disks() {
        let mut list = DrawList::new();
        push_box(&mut list, 5); // raised
        push_disk(&mut list, 1);
        push_box(&mut list, 2);
        push_disk(&mut list, 3);

        assert_eq!(
            paint_runs(&mut list),
            vec![
                PaintRun { kind: ShapeKind::Disk, range: 0..1 },
                PaintRun { kind: ShapeKind::Box, range: 0..1 },
                PaintRun { kind: ShapeKind::Disk, range: 1..2 },
                PaintRun { kind: ShapeKind::Box, range: 1..2 },
            ]
        );
    }
}
