//! Tests for slot geometry, source regions and the board layout

#[cfg(test)]
mod tests {
    use puzzleme::puzzle::tiles::{ImageHandle, TileSet};
    use puzzleme::spatial::grid::{
        BoardLayout, SlotCoord, SourceRegion, coord_to_slot, slot_to_coord,
    };

    // Tests slots map row-major to coordinates and back
    // Verified by swapping row and column
    #[test]
    fn test_slot_coordinates() {
        assert_eq!(slot_to_coord(5, 3), Some(SlotCoord { row: 1, col: 2 }));
        assert_eq!(slot_to_coord(0, 0), None);
        for slot in 0..16 {
            let Some(coord) = slot_to_coord(slot, 4) else {
                panic!("coordinate missing");
            };
            assert_eq!(coord_to_slot(coord, 4), slot);
        }
    }

    // Tests source regions follow background-position percentages
    // Verified by dividing by dim instead of dim - 1
    #[test]
    fn test_source_region_for_slot() {
        assert_eq!(
            SourceRegion::for_slot(0, 3),
            SourceRegion {
                x_percent: 0.0,
                y_percent: 0.0
            }
        );
        assert_eq!(
            SourceRegion::for_slot(5, 3),
            SourceRegion {
                x_percent: 100.0,
                y_percent: 50.0
            }
        );
        assert_eq!(SourceRegion::for_slot(0, 1), SourceRegion::default());
    }

    // Tests pixel origins span the free space of the image
    // Verified by scaling by the full image width
    #[test]
    fn test_pixel_origin() {
        let region = SourceRegion::for_slot(8, 3);
        assert_eq!(region.pixel_origin(300, 300, 100, 100), (200, 200));
        assert_eq!(SourceRegion::for_slot(4, 3).pixel_origin(300, 300, 100, 100), (100, 100));
        assert_eq!(region.pixel_origin(50, 50, 100, 100), (0, 0));
    }

    // Tests the layout inverts tile positions
    // Verified by storing correct positions instead
    #[test]
    fn test_board_layout() {
        let Ok(tiles) = TileSet::from_positions(ImageHandle::new("x.png"), 2, &[3, 2, 1, 0]) else {
            panic!("bad fixture");
        };
        let layout = BoardLayout::from_tiles(&tiles);
        assert_eq!(layout.dim(), 2);
        assert_eq!(layout.slots(), vec![3, 2, 1, 0]);
        assert_eq!(layout.tile_at(SlotCoord { row: 0, col: 1 }), Some(2));
        assert_eq!(layout.tile_at(SlotCoord { row: 2, col: 0 }), None);
        assert_eq!(layout.to_string(), "3 2\n1 0\n");
    }

    // Tests wide ids are right-aligned
    // Verified by printing without padding
    #[test]
    fn test_board_layout_alignment() {
        let positions: Vec<usize> = (0..16).collect();
        let Ok(tiles) = TileSet::from_positions(ImageHandle::new("x.png"), 4, &positions) else {
            panic!("bad fixture");
        };
        let rendered = BoardLayout::from_tiles(&tiles).to_string();
        assert!(rendered.starts_with(" 0  1  2  3\n"));
    }
}
