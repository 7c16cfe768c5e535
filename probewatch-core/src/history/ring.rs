//! Fixed-capacity circular sample buffer

/// One stored measurement
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Milliseconds since boot when the sample was stored
    pub timestamp_ms: u32,
    /// Temperature in degrees Celsius
    pub value: f32,
}

/// Circular buffer of samples
///
/// Storage is sized by `N`; the live capacity is chosen at runtime and may
/// be smaller. Once full, each push evicts the oldest sample.
#[derive(Debug, Clone)]
pub struct SampleRing<const N: usize> {
    buf: [Sample; N],
    /// Next write position
    head: usize,
    len: usize,
    capacity: usize,
}

impl<const N: usize> SampleRing<N> {
    /// Create an empty ring holding at most `capacity` samples
    ///
    /// `capacity` is clamped to `1..=N`.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: [Sample::default(); N],
            head: 0,
            len: 0,
            capacity: capacity.clamp(1, N),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Append a sample, returning the one it evicted if the ring was full
    pub fn push(&mut self, sample: Sample) -> Option<Sample> {
        let evicted = if self.is_full() {
            Some(self.buf[self.head])
        } else {
            self.len += 1;
            None
        };
        self.buf[self.head] = sample;
        self.head = (self.head + 1) % self.capacity;
        evicted
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Sample> + ExactSizeIterator + '_ {
        let start = (self.head + self.capacity - self.len) % self.capacity;
        (0..self.len).map(move |i| self.buf[(start + i) % self.capacity])
    }

    /// Most recently stored sample
    pub fn latest(&self) -> Option<Sample> {
        self.iter().next_back()
    }

    /// Oldest sample still held
    pub fn oldest(&self) -> Option<Sample> {
        self.iter().next()
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(t: u32) -> Sample {
        Sample {
            timestamp_ms: t,
            value: t as f32,
        }
    }

    #[test]
    fn test_fills_in_order() {
        let mut ring = SampleRing::<4>::new(4);
        assert!(ring.is_empty());
        for t in 0..3 {
            assert_eq!(ring.push(sample(t)), None);
        }
        assert_eq!(ring.len(), 3);
        let times: heapless::Vec<u32, 4> = ring.iter().map(|s| s.timestamp_ms).collect();
        assert_eq!(times.as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let mut ring = SampleRing::<4>::new(3);
        for t in 0..3 {
            ring.push(sample(t));
        }
        assert!(ring.is_full());
        assert_eq!(ring.push(sample(3)), Some(sample(0)));
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.oldest(), Some(sample(1)));
        assert_eq!(ring.latest(), Some(sample(3)));
    }

    #[test]
    fn test_iter_order_after_many_wraps() {
        let mut ring = SampleRing::<8>::new(5);
        for t in 0..23 {
            ring.push(sample(t));
        }
        let times: heapless::Vec<u32, 8> = ring.iter().map(|s| s.timestamp_ms).collect();
        assert_eq!(times.as_slice(), &[18, 19, 20, 21, 22]);
        assert_eq!(ring.iter().len(), 5);
    }

    #[test]
    fn test_capacity_is_clamped() {
        assert_eq!(SampleRing::<4>::new(0).capacity(), 1);
        assert_eq!(SampleRing::<4>::new(10).capacity(), 4);
    }

    #[test]
    fn test_clear() {
        let mut ring = SampleRing::<4>::new(4);
        ring.push(sample(1));
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.latest(), None);
    }
}
