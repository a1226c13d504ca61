use dog_grid::grid::{replicate, AxisSpacing, GridIndex, GridSpec, Spacing};
use dog_grid::scene::SceneNode;

#[cfg(test)]
mod grid_tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_replicate_calls_factory_once_per_cell() {
        let spec = GridSpec::new(2, 3, 4, Spacing::OUTER);
        let mut calls = 0;
        let grid = replicate("grid", &spec, |_| {
            calls += 1;
            SceneNode::group("item")
        });

        assert_eq!(calls, 24);
        assert_eq!(grid.children.len(), 24);
        assert!(grid.children.iter().all(|cell| cell.children.len() == 1));
    }

    #[test]
    fn test_replicate_with_zero_count_is_empty() {
        for spec in [
            GridSpec::new(0, 3, 3, Spacing::OUTER),
            GridSpec::new(3, 0, 3, Spacing::OUTER),
            GridSpec::new(3, 3, 0, Spacing::OUTER),
        ] {
            let mut calls = 0;
            let grid = replicate("grid", &spec, |_| {
                calls += 1;
                SceneNode::group("item")
            });
            assert_eq!(calls, 0);
            assert!(grid.children.is_empty());
        }
    }

    #[test]
    fn test_cells_are_positioned_at_their_offsets() {
        let spec = GridSpec::cube(3, Spacing::OUTER);
        let grid = replicate("outer", &spec, |_| SceneNode::group("item"));

        for (cell, index) in grid.children.iter().zip(spec.indices()) {
            assert_eq!(cell.transform.position, spec.offset(index));
            assert_eq!(cell.name, format!("outer[{},{},{}]", index.i, index.j, index.k));
        }
    }

    #[test]
    fn test_factory_receives_each_index() {
        let spec = GridSpec::cube(2, Spacing::INNER);
        let mut seen = Vec::new();
        replicate("inner", &spec, |index| {
            seen.push(index);
            SceneNode::group("item")
        });

        assert_eq!(seen.len(), 8);
        assert_eq!(seen[0], GridIndex::new(0, 0, 0));
        assert_eq!(seen[7], GridIndex::new(1, 1, 1));
    }

    #[test]
    fn test_outer_spacing_values() {
        let spec = GridSpec::cube(3, Spacing::OUTER);
        let expected = [-0.6, -0.1, 0.4];
        for (i, want) in expected.iter().enumerate() {
            let offset = spec.offset(GridIndex::new(i as u32, i as u32, 0));
            assert!(close(offset.x, *want));
            assert!(close(offset.y, *want));
        }

        // z steps by 1/1.1 instead of 1/2
        let step = spec.offset(GridIndex::new(0, 0, 1)).z - spec.offset(GridIndex::new(0, 0, 0)).z;
        assert!(close(step, 1.0 / 1.1));
    }

    #[test]
    fn test_offset_depends_only_on_index() {
        let spec = GridSpec::cube(3, Spacing::INNER);
        let a = spec.offset(GridIndex::new(1, 2, 0));
        let b = spec.offset(GridIndex::new(1, 2, 0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_axis_spacing_from_json() {
        let axis: AxisSpacing = serde_json::from_str(r#"{ "divisor": 4.0, "shift": 0.0 }"#).unwrap();
        assert_eq!(axis.bias, 0.0);
        assert!(close(axis.offset(2, 4), -1.5));
    }
}
