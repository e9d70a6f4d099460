/// Hands out `L<n>` labels for one class. Labels are never reused.
#[derive(Debug, Default)]
pub struct LabelAllocator {
    label_index: usize,
}

impl LabelAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    fn new_label(&mut self) -> String {
        let s = format!("L{}", self.label_index);
        self.label_index += 1;
        s
    }

    pub fn new_pair(&mut self) -> (String, String) {
        let first = self.new_label();
        let second = self.new_label();
        (first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_never_repeat() {
        let mut labels = LabelAllocator::new();
        assert_eq!(labels.new_pair(), ("L0".to_string(), "L1".to_string()));
        assert_eq!(labels.new_pair(), ("L2".to_string(), "L3".to_string()));
    }
}
