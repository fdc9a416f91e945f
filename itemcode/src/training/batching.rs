//! Compounding mini-batch sizes.

/// Infinite series of batch sizes growing by `factor` from `start` up to `stop`.
#[derive(Debug, Clone)]
pub struct Compounding {
    current: f64,
    stop: f64,
    factor: f64,
}

impl Iterator for Compounding {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let value = self.current;
        self.current = (self.current * self.factor).min(self.stop);
        Some(value)
    }
}

/// Start a compounding series.
pub fn compounding(start: f64, stop: f64, factor: f64) -> Compounding {
    Compounding {
        current: start.min(stop),
        stop,
        factor,
    }
}

/// Split `items` into consecutive batches whose sizes are drawn from `sizes`.
///
/// Sizes are truncated to whole items; a size below one still takes one item.
pub fn minibatches<'a, T, I>(items: &'a [T], sizes: I) -> Vec<&'a [T]>
where
    I: IntoIterator<Item = f64>,
{
    let mut batches = Vec::new();
    let mut rest = items;
    let mut sizes = sizes.into_iter();

    while !rest.is_empty() {
        let size = sizes.next().map_or(rest.len(), |s| (s as usize).max(1));
        let (batch, tail) = rest.split_at(size.min(rest.len()));
        batches.push(batch);
        rest = tail;
    }

    batches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compounding_caps_at_stop() {
        let sizes: Vec<f64> = compounding(4.0, 32.0, 1.5).take(7).collect();
        assert_eq!(sizes, vec![4.0, 6.0, 9.0, 13.5, 20.25, 30.375, 32.0]);
    }

    #[test]
    fn test_minibatches_cover_all_items() {
        let items: Vec<usize> = (0..30).collect();
        let batches = minibatches(&items, compounding(4.0, 32.0, 1.5));
        let lens: Vec<usize> = batches.iter().map(|b| b.len()).collect();
        assert_eq!(lens, vec![4, 6, 9, 11]);
        let flat: Vec<usize> = batches.concat();
        assert_eq!(flat, items);
    }

    #[test]
    fn test_minibatches_empty_input() {
        let items: Vec<u8> = Vec::new();
        assert!(minibatches(&items, compounding(4.0, 32.0, 1.5)).is_empty());
    }
}
