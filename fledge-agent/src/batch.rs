//! Concrete columns for replay storage.
//!
//! [`FloatBatch`] stores fixed-shape `f32` tensors row-wise in a flat
//! buffer; its per-item width is taken from the first pushed data, the way
//! the shape of a lazily-initialized tensor buffer would be. The first
//! axis of the pushed data is the batch axis.
use fledge_core::replay_memory::BatchData;

/// A column of flattened `f32` tensors.
pub struct FloatBatch {
    buf: Vec<f32>,
    capacity: usize,
    dim: Option<usize>,
}

impl FloatBatch {
    /// Creates a column holding a single item.
    pub fn from_item(data: Vec<f32>) -> Self {
        let dim = data.len();
        Self {
            buf: data,
            capacity: 1,
            dim: Some(dim),
        }
    }

    /// The number of `f32` elements per item, once known.
    pub fn dim(&self) -> Option<usize> {
        self.dim
    }

    /// The stored items as one flat slice, row-major.
    pub fn as_slice(&self) -> &[f32] {
        &self.buf
    }

    /// The number of items currently backed by storage.
    pub fn len(&self) -> usize {
        match self.dim {
            Some(dim) => self.buf.len() / dim,
            None => 0,
        }
    }

    /// Returns `true` if the column holds no item.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BatchData for FloatBatch {
    fn new(capacity: usize) -> Self {
        Self {
            buf: Vec::new(),
            capacity,
            dim: None,
        }
    }

    fn push(&mut self, ix: usize, data: Self) {
        let dim = match data.dim {
            Some(dim) => dim,
            None => return,
        };

        if self.dim.is_none() {
            self.dim = Some(dim);
            self.buf = vec![0.; self.capacity * dim];
        }

        let rows = data.buf.len() / dim;
        for r in 0..rows {
            let dst = (ix + r) % self.capacity;
            self.buf[dst * dim..(dst + 1) * dim]
                .copy_from_slice(&data.buf[r * dim..(r + 1) * dim]);
        }
    }

    fn sample(&self, ixs: &[usize]) -> Self {
        let dim = match self.dim {
            Some(dim) => dim,
            None => return Self::new(ixs.len()),
        };

        let mut buf = Vec::with_capacity(ixs.len() * dim);
        for ix in ixs.iter() {
            buf.extend_from_slice(&self.buf[ix * dim..(ix + 1) * dim]);
        }

        Self {
            buf,
            capacity: ixs.len(),
            dim: Some(dim),
        }
    }
}

/// A column of discrete action indices.
pub struct DiscreteActBatch {
    buf: Vec<i32>,
}

impl DiscreteActBatch {
    /// Creates a column holding a single action.
    pub fn from_item(act: i32) -> Self {
        Self { buf: vec![act] }
    }

    /// The stored action indices.
    pub fn as_slice(&self) -> &[i32] {
        &self.buf
    }
}

impl BatchData for DiscreteActBatch {
    fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity],
        }
    }

    fn push(&mut self, ix: usize, data: Self) {
        let capacity = self.buf.len();
        let mut j = ix;
        for v in data.buf.iter() {
            self.buf[j] = *v;
            j += 1;
            if j == capacity {
                j = 0;
            }
        }
    }

    fn sample(&self, ixs: &[usize]) -> Self {
        Self {
            buf: ixs.iter().map(|ix| self.buf[*ix]).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_batch_wraps_at_capacity() {
        let mut col = FloatBatch::new(3);
        for i in 0..5 {
            col.push(i % 3, FloatBatch::from_item(vec![i as f32, -(i as f32)]));
        }
        // Slots after 5 pushes into capacity 3: [3, 4, 2]
        assert_eq!(col.dim(), Some(2));
        assert_eq!(col.as_slice(), &[3., -3., 4., -4., 2., -2.]);
    }

    #[test]
    fn float_batch_sample_gathers_rows() {
        let mut col = FloatBatch::new(4);
        for i in 0..4 {
            col.push(i, FloatBatch::from_item(vec![i as f32 * 10., 1.]));
        }
        let picked = col.sample(&[2, 0]);
        assert_eq!(picked.as_slice(), &[20., 1., 0., 1.]);
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn act_batch_roundtrip() {
        let mut col = DiscreteActBatch::new(3);
        for i in 0..4 {
            col.push(i % 3, DiscreteActBatch::from_item(i as i32));
        }
        let picked = col.sample(&[0, 1, 2]);
        assert_eq!(picked.as_slice(), &[3, 1, 2]);
    }
}
