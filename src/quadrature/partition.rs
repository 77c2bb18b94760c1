use crate::quadrature::quadratureerror::QuadratureError;

/// `n + 1` equally spaced nodes on `[a, b]`.
///
/// `b < a` is allowed; the step is then negative.
#[derive(Debug, Clone)]
pub struct Partition {
    nodes: Vec<f64>,
    step: f64
}

impl Partition {
    pub fn new(a: f64, b: f64, n: usize) -> Result<Partition, QuadratureError> {
        QuadratureError::check_bounds(a, b)?;
        if n == 0 {
            return Err(QuadratureError::InvalidSubdivisions(n));
        }

        let step = (b - a) / n as f64;
        // last node pinned to b so the partition closes exactly
        let nodes = (0..=n)
            .map(|i| if i == n { b } else { a + i as f64 * step })
            .collect();
        Ok(Partition { nodes, step })
    }

    pub fn n(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    pub fn a(&self) -> f64 {
        self.nodes[0]
    }

    pub fn b(&self) -> f64 {
        self.nodes[self.n()]
    }

    pub fn is_degenerate(&self) -> bool {
        self.a() == self.b()
    }

    /// Left endpoints `x_0..x_{n-1}`.
    pub fn left_nodes(&self) -> &[f64] {
        &self.nodes[..self.n()]
    }

    /// Right endpoints `x_1..x_n`.
    pub fn right_nodes(&self) -> &[f64] {
        &self.nodes[1..]
    }

    pub fn midpoints(&self) -> Vec<f64> {
        self.nodes
            .windows(2)
            .map(|w| (w[0] + w[1]) / 2.0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn nodes_are_equally_spaced_and_closed() {
        let partition = Partition::new(0.0, 2.0, 4).unwrap();
        assert_eq!(partition.n(), 4);
        assert_relative_eq!(partition.step(), 0.5);
        assert_eq!(partition.nodes(), &[0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(partition.midpoints(), vec![0.25, 0.75, 1.25, 1.75]);
        assert_eq!(partition.left_nodes().len(), 4);
        assert_eq!(partition.right_nodes()[3], 2.0);
    }

    #[test]
    fn last_node_is_exactly_b() {
        let partition = Partition::new(0.0, 1.0, 3).unwrap();
        assert_eq!(partition.b(), 1.0);
    }

    #[test]
    fn reversed_interval_has_negative_step() {
        let partition = Partition::new(2.0, 0.0, 2).unwrap();
        assert_eq!(partition.step(), -1.0);
        assert_eq!(partition.nodes(), &[2.0, 1.0, 0.0]);
    }

    #[test]
    fn rejects_zero_subdivisions_and_non_finite_bounds() {
        assert_eq!(Partition::new(0.0, 1.0, 0).unwrap_err(), QuadratureError::InvalidSubdivisions(0));
        assert!(matches!(
            Partition::new(0.0, f64::INFINITY, 2),
            Err(QuadratureError::NonFiniteBound { .. })
        ));
    }

    #[test]
    fn degenerate_interval_is_detected() {
        let partition = Partition::new(1.0, 1.0, 5).unwrap();
        assert!(partition.is_degenerate());
        assert_eq!(partition.step(), 0.0);
    }
}
