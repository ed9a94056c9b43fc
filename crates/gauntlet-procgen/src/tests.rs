#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use gauntlet_core::config::{DifficultyProfile, DungeonConfig};
    use gauntlet_core::enums::{Direction, Topology};
    use gauntlet_core::error::GenerationError;
    use gauntlet_core::types::GridCoord;

    use crate::lattice::{carve_lattice, exit_tile, place_traps, Tile};
    use crate::layout::{build_dungeon, build_layout, farthest_cell, wall_segments};
    use crate::maze::{generate, Maze};
    use crate::placement::{analyze, classify, classify_all, select, AnchorFrame};

    fn c(x: u32, y: u32) -> GridCoord {
        GridCoord::new(x, y)
    }

    fn always(p: f64) -> DifficultyProfile {
        DifficultyProfile {
            dead_end: p,
            corner: p,
            intersection: p,
        }
    }

    /// Hand-carved 3x3 spanning tree:
    ///
    /// ```text
    ///  y=2   o---o---o
    ///        |   |
    ///  y=1   o   o---o
    ///        |   |
    ///  y=0   o   o---o
    /// ```
    fn hand_maze() -> Maze {
        let mut maze = Maze::new(3, 3).unwrap();
        for (coord, dir) in [
            (c(0, 0), Direction::North),
            (c(0, 1), Direction::North),
            (c(0, 2), Direction::East),
            (c(1, 2), Direction::East),
            (c(1, 2), Direction::South),
            (c(1, 1), Direction::East),
            (c(1, 1), Direction::South),
            (c(1, 0), Direction::East),
        ] {
            assert!(maze.open_wall(coord, dir));
        }
        maze
    }

    fn is_perfect(maze: &Maze) -> bool {
        let cells = (maze.width() * maze.height()) as usize;
        maze.open_wall_count() == cells - 1
            && maze.path_distances(c(0, 0)).iter().all(Option::is_some)
    }

    // ---- Maze ----

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            generate(0, 5, 1).unwrap_err(),
            GenerationError::InvalidDimensions {
                width: 0,
                height: 5,
                min: 1
            }
        );
        assert!(generate(4, 0, 1).is_err());
    }

    #[test]
    fn test_single_cell_maze_has_no_openings() {
        let maze = generate(1, 1, 9).unwrap();
        assert_eq!(maze.open_wall_count(), 0);
        assert_eq!(maze.cell(c(0, 0)).unwrap().open_count(), 0);
    }

    #[test]
    fn test_open_wall_is_symmetric_and_refuses_boundary() {
        let mut maze = Maze::new(2, 2).unwrap();
        assert!(maze.open_wall(c(0, 0), Direction::East));
        assert!(!maze.has_wall(c(0, 0), Direction::East));
        assert!(!maze.has_wall(c(1, 0), Direction::West));

        assert!(!maze.open_wall(c(0, 0), Direction::South));
        assert!(maze.has_wall(c(0, 0), Direction::South));
        assert!(!maze.open_wall(c(5, 5), Direction::North));
    }

    #[test]
    fn test_every_cell_visited_after_generation() {
        let maze = generate(9, 7, 1234).unwrap();
        assert!(maze.coords().all(|p| maze.cell(p).unwrap().visited()));
        assert!(is_perfect(&maze));
    }

    #[test]
    fn test_large_maze_does_not_recurse() {
        let maze = generate(300, 300, 5).unwrap();
        assert_eq!(maze.open_wall_count(), 300 * 300 - 1);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate(12, 12, 1).unwrap();
        let b = generate(12, 12, 2).unwrap();
        assert_ne!(a, b);
    }

    // ---- Classification ----

    #[test]
    fn test_hand_maze_classification_table() {
        let maze = hand_maze();
        assert!(is_perfect(&maze));

        let expected = [
            (c(0, 0), Some(Topology::DeadEnd)),
            (c(1, 0), Some(Topology::Corner)),
            (c(2, 0), Some(Topology::DeadEnd)),
            (c(0, 1), None),
            (c(1, 1), Some(Topology::Intersection)),
            (c(2, 1), Some(Topology::DeadEnd)),
            (c(0, 2), Some(Topology::Corner)),
            (c(1, 2), Some(Topology::Intersection)),
            (c(2, 2), Some(Topology::DeadEnd)),
        ];
        assert_eq!(classify_all(&maze), expected.to_vec());
    }

    #[test]
    fn test_four_open_sides_is_intersection() {
        let mut maze = Maze::new(3, 3).unwrap();
        for dir in Direction::SCAN_ORDER {
            maze.open_wall(c(1, 1), dir);
        }
        let cell = maze.cell(c(1, 1)).unwrap();
        assert_eq!(cell.open_count(), 4);
        assert_eq!(classify(cell), Some(Topology::Intersection));
        assert_eq!(classify(maze.cell(c(1, 0)).unwrap()), Some(Topology::DeadEnd));
    }

    #[test]
    fn test_analyze_only_interior_cells() {
        let maze = hand_maze();
        let candidates = analyze(&maze, &always(1.0));
        assert_eq!(candidates.len(), 1);
        let only = candidates[0];
        assert_eq!(only.cell, c(1, 1));
        assert_eq!(only.open_sides, 3);
        assert_eq!(only.topology, Topology::Intersection);
        assert_eq!(only.facing, Direction::North);
    }

    #[test]
    fn test_zero_probability_tags_are_dropped() {
        let maze = hand_maze();
        let profile = DifficultyProfile {
            dead_end: 1.0,
            corner: 1.0,
            intersection: 0.0,
        };
        assert!(analyze(&maze, &profile).is_empty());
    }

    #[test]
    fn test_small_grid_yields_no_candidates() {
        let maze = generate(2, 2, 3).unwrap();
        assert!(analyze(&maze, &always(1.0)).is_empty());
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let frame = AnchorFrame {
            cell_size: 3.0,
            height_offset: 0.5,
        };
        assert!(select(&[], &always(1.0), frame, &mut rng).is_empty());
    }

    // ---- Selection ----

    #[test]
    fn test_select_places_anchor_on_cell_centre() {
        let maze = hand_maze();
        let candidates = analyze(&maze, &always(1.0));
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let frame = AnchorFrame {
            cell_size: 3.0,
            height_offset: 0.5,
        };
        let anchors = select(&candidates, &always(1.0), frame, &mut rng);
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].position, glam::DVec3::new(3.0, 0.5, 3.0));
        assert_eq!(anchors[0].yaw_deg, 0.0);
    }

    #[test]
    fn test_select_rate_tracks_probability() {
        let maze = generate(41, 41, 77).unwrap();
        let candidates = analyze(&maze, &always(1.0));
        let frame = AnchorFrame {
            cell_size: 1.0,
            height_offset: 0.0,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let picked = select(&candidates, &always(0.5), frame, &mut rng).len() as f64;
        let ratio = picked / candidates.len() as f64;
        assert!((0.35..0.65).contains(&ratio), "ratio {ratio}");
    }

    #[test]
    fn test_anchor_cells_are_unique_and_face_open_side() {
        let maze = generate(21, 21, 8).unwrap();
        let candidates = analyze(&maze, &always(1.0));
        let frame = AnchorFrame {
            cell_size: 3.0,
            height_offset: 0.5,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let anchors = select(&candidates, &always(1.0), frame, &mut rng);
        assert_eq!(anchors.len(), candidates.len());

        let mut cells: Vec<_> = anchors.iter().map(|a| a.cell).collect();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), anchors.len());

        for anchor in &anchors {
            let facing = Direction::SCAN_ORDER
                .into_iter()
                .find(|d| d.yaw_deg() == anchor.yaw_deg)
                .unwrap();
            assert!(!maze.has_wall(anchor.cell, facing));
        }
    }

    // ---- Layout ----

    #[test]
    fn test_wall_segments_cover_each_wall_once() {
        let maze = hand_maze();
        let walls = wall_segments(&maze, 3.0, 1.0);
        // 12 boundary + 12 interior - 8 open
        assert_eq!(walls.len(), 16);

        let west_of_origin = walls
            .iter()
            .find(|w| w.cell == c(0, 0) && w.side == Direction::West)
            .unwrap();
        assert_eq!(west_of_origin.position, glam::DVec3::new(-1.5, 1.0, 0.0));
        assert_eq!(west_of_origin.yaw_deg, 90.0);

        let south = walls
            .iter()
            .find(|w| w.cell == c(2, 0) && w.side == Direction::South)
            .unwrap();
        assert_eq!(south.yaw_deg, 0.0);
    }

    #[test]
    fn test_layout_spawn_floor_and_exit() {
        let maze = generate(15, 15, 42).unwrap();
        let config = DungeonConfig::default();
        let layout = build_layout(&maze, &config, Vec::new());

        assert_eq!(layout.spawn_cell, c(7, 7));
        assert_eq!(layout.player_spawn, glam::DVec3::new(21.0, 1.0, 21.0));
        assert_eq!(layout.floor.center, glam::DVec3::new(21.0, -0.5, 21.0));
        assert_eq!(layout.floor.size_x, 45.0);

        let dist = maze.path_distances(layout.spawn_cell);
        let max = dist.iter().flatten().max().copied().unwrap();
        let exit_idx = (layout.exit_cell.y * 15 + layout.exit_cell.x) as usize;
        assert_eq!(dist[exit_idx], Some(max));
        assert_eq!(farthest_cell(&maze, layout.spawn_cell), layout.exit_cell);
    }

    #[test]
    fn test_build_dungeon_is_reproducible() {
        let config = DungeonConfig::default();
        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let (_, layout) = build_dungeon(&config, &mut rng).unwrap();
            serde_json::to_string(&layout).unwrap()
        };
        assert_eq!(run(99), run(99));
        assert_ne!(run(99), run(100));
    }

    // ---- Lattice ----

    #[test]
    fn test_lattice_connects_every_room() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let lattice = carve_lattice(11, 11, &mut rng).unwrap();

        for p in lattice.coords() {
            let border = p.x == 0 || p.y == 0 || p.x == 10 || p.y == 10;
            if border {
                assert_eq!(lattice.tile(p), Some(Tile::Wall));
            }
            if p.x % 2 == 1 && p.y % 2 == 1 {
                assert!(lattice.is_open(p), "room {p:?} not carved");
            }
        }
        // 25 rooms joined by 24 opened walls.
        assert_eq!(lattice.open_count(), 49);
        assert_eq!(exit_tile(&lattice), c(9, 9));
    }

    #[test]
    fn test_lattice_too_small() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            carve_lattice(2, 9, &mut rng),
            Err(GenerationError::InvalidDimensions { min: 3, .. })
        ));
    }

    #[test]
    fn test_traps_avoid_outer_rings() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let lattice = carve_lattice(15, 15, &mut rng).unwrap();

        let traps = place_traps(&lattice, 1.0, 3, &mut rng);
        assert!(!traps.is_empty());
        for trap in &traps {
            assert!((2..13).contains(&trap.tile.x) && (2..13).contains(&trap.tile.y));
            assert_eq!(lattice.tile(trap.tile), Some(Tile::Wall));
            assert!(trap.kind < 3);
        }

        assert!(place_traps(&lattice, 0.0, 3, &mut rng).is_empty());
        assert!(place_traps(&lattice, 1.0, 0, &mut rng).is_empty());
    }

    // ---- Properties ----

    proptest! {
        #[test]
        fn prop_generated_maze_is_perfect(w in 2u32..16, h in 2u32..16, seed in any::<u64>()) {
            let maze = generate(w, h, seed).unwrap();
            prop_assert!(is_perfect(&maze));
        }

        #[test]
        fn prop_same_seed_same_walls(w in 1u32..16, h in 1u32..16, seed in any::<u64>()) {
            prop_assert_eq!(generate(w, h, seed).unwrap(), generate(w, h, seed).unwrap());
        }

        #[test]
        fn prop_walls_agree_from_both_sides(w in 2u32..12, h in 2u32..12, seed in any::<u64>()) {
            let maze = generate(w, h, seed).unwrap();
            for p in maze.coords() {
                for dir in Direction::SCAN_ORDER {
                    if let Some(n) = maze.neighbor(p, dir) {
                        prop_assert_eq!(maze.has_wall(p, dir), maze.has_wall(n, dir.opposite()));
                    }
                }
            }
        }

        #[test]
        fn prop_dead_ends_always_tagged(w in 3u32..12, h in 3u32..12, seed in any::<u64>()) {
            let maze = generate(w, h, seed).unwrap();
            for (p, tag) in classify_all(&maze) {
                let open = maze.cell(p).unwrap().open_count();
                if open == 1 {
                    prop_assert_eq!(tag, Some(Topology::DeadEnd));
                }
                if open >= 3 {
                    prop_assert_eq!(tag, Some(Topology::Intersection));
                }
            }
        }
    }
}
