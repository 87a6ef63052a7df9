use crate::model::SectionId;

/// Open nesting path of sections, shallowest first
#[derive(Debug, Default, Clone)]
pub struct SectionStack {
    entries: Vec<(usize, SectionId)>,
}

impl SectionStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close every open section at `depth` or deeper and return the nearest
    /// strictly shallower one, which becomes the parent of a new heading
    pub fn resolve_parent(&mut self, depth: usize) -> Option<SectionId> {
        while let Some(&(open_depth, _)) = self.entries.last() {
            if open_depth < depth {
                break;
            }
            self.entries.pop();
        }
        self.top()
    }

    pub fn push(&mut self, depth: usize, id: SectionId) {
        self.entries.push((depth, id));
    }

    /// Innermost open section
    pub fn top(&self) -> Option<SectionId> {
        self.entries.last().map(|&(_, id)| id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Depths of the open path, shallowest first
    pub fn depths(&self) -> Vec<usize> {
        self.entries.iter().map(|&(depth, _)| depth).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_pops_equal_and_deeper() {
        let mut stack = SectionStack::new();
        stack.push(1, SectionId(0));
        stack.push(3, SectionId(1));
        stack.push(5, SectionId(2));

        assert_eq!(stack.resolve_parent(3), Some(SectionId(0)));
        assert_eq!(stack.depths(), vec![1]);
    }

    #[test]
    fn test_resolve_keeps_shallower() {
        let mut stack = SectionStack::new();
        stack.push(1, SectionId(0));

        assert_eq!(stack.resolve_parent(4), Some(SectionId(0)));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_resolve_empties_stack() {
        let mut stack = SectionStack::new();
        stack.push(3, SectionId(0));
        stack.push(4, SectionId(1));

        assert_eq!(stack.resolve_parent(1), None);
        assert!(stack.is_empty());
        assert_eq!(stack.top(), None);
    }
}
