//! Tests for k-d tree nearest color search

#[cfg(test)]
mod tests {
    use bitvec::vec::BitVec;
    use photomosaic::MosaicError;
    use photomosaic::matching::index::NearestColorIndex;
    use photomosaic::matching::kdtree::KdTree;
    use photomosaic::matching::linear::LinearIndex;
    use photomosaic::raster::color::Color;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_colors(rng: &mut StdRng, count: usize) -> Vec<Color> {
        (0..count)
            .map(|_| {
                Color::new(
                    rng.random_range(0.0..255.0),
                    rng.random_range(0.0..255.0),
                    rng.random_range(0.0..255.0),
                )
            })
            .collect()
    }

    // Tests tree answers agree with a linear scan on random data
    // Verified by never descending into the far subtree
    #[test]
    fn test_matches_linear_scan() {
        let mut rng = StdRng::seed_from_u64(7);
        let references = random_colors(&mut rng, 500);
        let queries = random_colors(&mut rng, 300);

        let tree = KdTree::build(&references).unwrap();
        let linear = LinearIndex::new(&references).unwrap();

        let tree_results = tree.query(&queries).unwrap();
        let linear_results = linear.query(&queries).unwrap();
        for (a, b) in tree_results.iter().zip(&linear_results) {
            assert_eq!(a.index, b.index);
            assert!((a.distance_squared - b.distance_squared).abs() < 1e-9);
        }
    }

    // Tests duplicate references resolve to the lowest index
    // Verified by pruning on equal plane distance
    #[test]
    fn test_duplicate_references_prefer_lowest_index() {
        let mut references = vec![Color::new(100.0, 100.0, 100.0); 9];
        references.insert(0, Color::new(0.0, 0.0, 0.0));
        let tree = KdTree::build(&references).unwrap();

        let result = tree.nearest(Color::new(101.0, 100.0, 100.0)).unwrap();
        assert_eq!(result.index, 1);
    }

    // Tests consumed references are skipped and exhaustion returns None
    // Verified by ignoring the consumed bit set in the search
    #[test]
    fn test_nearest_excluding_consumed() {
        let references = vec![
            Color::new(0.0, 0.0, 0.0),
            Color::new(10.0, 10.0, 10.0),
            Color::new(20.0, 20.0, 20.0),
        ];
        let tree = KdTree::build(&references).unwrap();
        let mut consumed = BitVec::repeat(false, 3);

        let target = Color::new(9.0, 9.0, 9.0);
        let mut order = Vec::new();
        while let Some(result) = tree.nearest_excluding(target, &consumed) {
            order.push(result.index);
            consumed.set(result.index, true);
        }

        assert_eq!(order, vec![1, 0, 2]);
    }

    // Tests single-reference trees answer every query
    // Verified by treating one-element ranges as empty
    #[test]
    fn test_single_reference() {
        let tree = KdTree::build(&[Color::new(1.0, 2.0, 3.0)]).unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.nearest(Color::new(200.0, 0.0, 0.0)).unwrap().index, 0);
    }

    // Tests the tree stays balanced
    // Verified by splitting at the first element instead of the median
    #[test]
    fn test_balanced_depth() {
        let mut rng = StdRng::seed_from_u64(3);
        let tree = KdTree::build(&random_colors(&mut rng, 1000)).unwrap();
        assert_eq!(tree.depth(), 10);
    }

    // Tests an empty reference set is rejected
    // Verified by building an empty tree
    #[test]
    fn test_empty_reference_set() {
        assert!(matches!(
            KdTree::build(&[]),
            Err(MosaicError::EmptyReferenceSet)
        ));
    }
}
