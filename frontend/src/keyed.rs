use std::collections::HashSet;
use std::hash::Hash;

/// How to get from the currently rendered keys to the next sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyedPlan<K> {
    /// Final order, duplicates dropped.
    pub order: Vec<K>,
    /// Keys that need a fresh node.
    pub created: Vec<K>,
    /// Rendered keys that are gone.
    pub removed: Vec<K>,
}

/// Keys present on both sides keep their node and are only moved.
pub fn plan<K, I>(rendered: I, next: &[K]) -> KeyedPlan<K>
where
    K: Copy + Eq + Hash,
    I: IntoIterator<Item = K>,
{
    let rendered: Vec<K> = rendered.into_iter().collect();
    let rendered_set: HashSet<K> = rendered.iter().copied().collect();

    let mut seen = HashSet::new();
    let order: Vec<K> = next.iter().copied().filter(|key| seen.insert(*key)).collect();

    let created = order
        .iter()
        .copied()
        .filter(|key| !rendered_set.contains(key))
        .collect();
    let removed = rendered
        .into_iter()
        .filter(|key| !seen.contains(key))
        .collect();

    KeyedPlan {
        order,
        created,
        removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reorder_creates_nothing() {
        let plan = plan(vec![1u64, 2, 3], &[3, 1, 2]);
        assert_eq!(plan.order, vec![3, 1, 2]);
        assert!(plan.created.is_empty());
        assert!(plan.removed.is_empty());
    }

    #[test]
    fn filter_then_widen() {
        let narrowed = plan(vec![1u64, 2, 3], &[2]);
        assert_eq!(narrowed.removed, vec![1, 3]);
        assert!(narrowed.created.is_empty());

        let widened = plan(vec![2u64], &[1, 2, 3]);
        assert_eq!(widened.created, vec![1, 3]);
        assert!(widened.removed.is_empty());
    }

    #[test]
    fn duplicate_keys_render_once() {
        let plan = plan(Vec::<u64>::new(), &[5, 5, 6]);
        assert_eq!(plan.order, vec![5, 6]);
        assert_eq!(plan.created, vec![5, 6]);
    }
}
