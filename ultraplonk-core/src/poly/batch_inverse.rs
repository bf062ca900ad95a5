use ark_ff::Field;

/// Inverts every element of `values` in place using Montgomery's trick.
///
/// Returns `None`, leaving `values` untouched, if any element is zero.
pub fn batch_inverse<F: Field>(values: &mut [F]) -> Option<()> {
    let mut prefix = Vec::with_capacity(values.len());
    let mut acc = F::one();
    for v in values.iter() {
        prefix.push(acc);
        acc *= v;
    }
    let mut acc_inv = acc.inverse()?;
    for (v, prefix_v) in values.iter_mut().zip(prefix).rev() {
        let inv = acc_inv * prefix_v;
        acc_inv *= *v;
        *v = inv;
    }
    Some(())
}
