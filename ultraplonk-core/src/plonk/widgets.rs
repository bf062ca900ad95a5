//! Gate, copy-permutation and lookup relations of UltraPlonk, evaluated at
//! `ζ` from the claimed evaluations.
//!
//! Each widget contributes `Σ_k α_base α^k · relation_k` and then advances
//! `α_base` past the powers it used, so widgets must run in [`WIDGETS`]
//! order.

use ark_bn254::Fr;
use ark_ff::{AdditiveGroup, Field, MontFp, One};

use super::challenges::Challenges;
use super::proof::ProofEvaluations;

/// `-1/2 mod r`
const NEGATIVE_INVERSE_OF_2: Fr =
    MontFp!("10944121435919637611123202872628637544274182200208017171849102093287904247808");
/// `2^68`, the limb size of the non-native field gates.
const LIMB_SIZE: Fr = MontFp!("295147905179352825856");
/// `2^14`
const SUBLIMB_SHIFT: Fr = MontFp!("16384");
/// Grumpkin is `y^2 = x^3 - 17`.
const GRUMPKIN_B_NEGATED: Fr = MontFp!("17");

/// Everything a widget may read.
pub struct WidgetInputs<'a> {
    pub evals: &'a ProofEvaluations,
    pub challenges: &'a Challenges,
    pub l_start: Fr,
    pub l_end: Fr,
    pub public_input_delta: Fr,
    pub plookup_delta: Fr,
}

pub trait Widget: Sync {
    fn name(&self) -> &'static str;
    /// Number of consecutive powers of `α` the widget consumes.
    fn num_alpha_powers(&self) -> u32;
    fn evaluate(&self, inputs: &WidgetInputs, alpha_base: Fr) -> Fr;
}

pub struct PermutationWidget;
pub struct PlookupWidget;
pub struct ArithmeticWidget;
pub struct SortWidget;
pub struct EllipticWidget;
pub struct AuxiliaryWidget;

pub static WIDGETS: [&dyn Widget; 6] = [
    &PermutationWidget,
    &PlookupWidget,
    &ArithmeticWidget,
    &SortWidget,
    &EllipticWidget,
    &AuxiliaryWidget,
];

/// Sum of all widget relations, not yet divided by the vanishing polynomial.
#[tracing::instrument(skip_all, name = "widgets::evaluate_all")]
pub fn evaluate_all(inputs: &WidgetInputs) -> Fr {
    let challenges = inputs.challenges;
    let mut alpha_base = challenges.alpha;
    let mut sum = Fr::from(0u64);
    for widget in WIDGETS {
        let contribution = widget.evaluate(inputs, alpha_base);
        tracing::trace!(widget = widget.name(), "evaluated");
        sum += contribution;
        alpha_base *= match widget.num_alpha_powers() {
            2 => challenges.alpha_sqr,
            3 => challenges.alpha_cube,
            4 => challenges.alpha_quad,
            k => challenges.alpha.pow([k as u64]),
        };
    }
    sum
}

impl Widget for PermutationWidget {
    fn name(&self) -> &'static str {
        "permutation"
    }

    fn num_alpha_powers(&self) -> u32 {
        3
    }

    /// Grand product step `z(X)·∏(w_i + β·id_i + γ) - z(Xω)·∏(w_i + β·σ_i + γ)`,
    /// the boundary `L_end·(z(Xω) - ΔPI)` and the start `L_start·(z(X) - 1)`.
    fn evaluate(&self, inputs: &WidgetInputs, alpha_base: Fr) -> Fr {
        let e = inputs.evals;
        let Challenges {
            alpha, beta, gamma, ..
        } = *inputs.challenges;
        let wires = [e.w1, e.w2, e.w3, e.w4];

        let column = |w: Fr, s: Fr| w + gamma + beta * s;
        let identity_product: Fr = wires
            .iter()
            .zip([e.id1, e.id2, e.id3, e.id4])
            .map(|(w, id)| column(*w, id))
            .product();
        let sigma_product: Fr = wires
            .iter()
            .zip([e.sigma1, e.sigma2, e.sigma3, e.sigma4])
            .map(|(w, sigma)| column(*w, sigma))
            .product();

        let grand_product = e.z * identity_product - e.z_omega * sigma_product;
        let last_row = inputs.l_end * (e.z_omega - inputs.public_input_delta);
        let first_row = inputs.l_start * (e.z - Fr::one());

        alpha_base * (grand_product + alpha * (last_row + alpha * first_row))
    }
}

impl Widget for PlookupWidget {
    fn name(&self) -> &'static str {
        "plookup"
    }

    fn num_alpha_powers(&self) -> u32 {
        3
    }

    fn evaluate(&self, inputs: &WidgetInputs, alpha_base: Fr) -> Fr {
        let e = inputs.evals;
        let c = inputs.challenges;
        let one = Fr::one();

        // Lookup query: wire values, with the next row scaled by the step
        // sizes in q2, qm and qc, compressed with η.
        let f = ((c.eta * e.q3 + e.w3 + e.qc * e.w3_omega) * c.eta
            + e.w2
            + e.qm * e.w2_omega)
            * c.eta
            + e.w1
            + e.q2 * e.w1_omega;

        let compress = |t1: Fr, t2: Fr, t3: Fr, t4: Fr| {
            t4 * c.eta_cube + t3 * c.eta_sqr + t2 * c.eta + t1
        };
        let t = compress(e.table1, e.table2, e.table3, e.table4);
        let t_omega = compress(
            e.table1_omega,
            e.table2_omega,
            e.table3_omega,
            e.table4_omega,
        );

        let gamma_beta = c.gamma * (c.beta + one);
        let start = c.alpha * inputs.l_start;
        let end = c.alpha_sqr * inputs.l_end;

        let numerator = ((f * e.table_type + c.gamma)
            * (t + t_omega * c.beta + gamma_beta)
            * (c.beta + one)
            + start)
            * e.z_lookup
            - start;
        let denominator = (e.s + e.s_omega * c.beta + gamma_beta - end) * e.z_lookup_omega
            + end * inputs.plookup_delta;

        (numerator - denominator) * alpha_base
    }
}

impl Widget for ArithmeticWidget {
    fn name(&self) -> &'static str {
        "arithmetic"
    }

    fn num_alpha_powers(&self) -> u32 {
        2
    }

    /// Big add/mul gate, which for `q_arith = 2` also constrains the next
    /// row's `w1` and for `q_arith = 3` the next row's `w4`.
    fn evaluate(&self, inputs: &WidgetInputs, alpha_base: Fr) -> Fr {
        let e = inputs.evals;
        let alpha = inputs.challenges.alpha;

        let mul_term =
            e.w1 * e.w2 * e.qm * (e.q_arith - Fr::from(3u64)) * NEGATIVE_INVERSE_OF_2;
        let identity = mul_term + e.w1 * e.q1 + e.w2 * e.q2 + e.w3 * e.q3 + e.w4 * e.q4 + e.qc;

        let extra_small_addition =
            alpha * (e.q_arith - Fr::from(2u64)) * (e.w1 + e.w4 - e.w1_omega + e.qm);

        alpha_base
            * e.q_arith
            * (identity + (e.q_arith - Fr::one()) * (e.w4_omega + extra_small_addition))
    }
}

impl Widget for SortWidget {
    fn name(&self) -> &'static str {
        "sort"
    }

    fn num_alpha_powers(&self) -> u32 {
        4
    }

    /// Consecutive wire values differ by 0, 1, 2 or 3.
    fn evaluate(&self, inputs: &WidgetInputs, alpha_base: Fr) -> Fr {
        let e = inputs.evals;
        let c = inputs.challenges;
        let in_range = |d: Fr| d * (d - Fr::one()) * (d - Fr::from(2u64)) * (d - Fr::from(3u64));

        let deltas = [e.w2 - e.w1, e.w3 - e.w2, e.w4 - e.w3, e.w1_omega - e.w4];
        let powers = [Fr::one(), c.alpha, c.alpha_sqr, c.alpha_cube];
        let accumulator: Fr = deltas
            .into_iter()
            .zip(powers)
            .map(|(d, power)| in_range(d) * power)
            .sum();

        accumulator * alpha_base * e.q_sort
    }
}

impl Widget for EllipticWidget {
    fn name(&self) -> &'static str {
        "elliptic"
    }

    fn num_alpha_powers(&self) -> u32 {
        4
    }

    /// Grumpkin point addition (`qm = 0`, `q1` selects subtraction) or
    /// doubling (`qm = 1`) of `(x1, y1)` into `(x3, y3)`.
    fn evaluate(&self, inputs: &WidgetInputs, alpha_base: Fr) -> Fr {
        let e = inputs.evals;
        let alpha = inputs.challenges.alpha;
        let one = Fr::one();

        let (x1, y1) = (e.w2, e.w3);
        let (x2, y2) = (e.w1_omega, e.w4_omega);
        let (x3, y3) = (e.w2_omega, e.w3_omega);
        let sign = e.q1;

        let x_diff = x2 - x1;
        let y1_sqr = y1.square();
        let y2_sqr = y2.square();
        let y1y2 = y1 * y2 * sign;

        let x_add = ((x3 + x2 + x1) * x_diff.square() + y1y2.double() - (y1_sqr + y2_sqr))
            * (one - e.qm)
            * alpha_base;
        let y_add = ((y1 + y3) * x_diff + (x3 - x1) * (y2 * sign - y1))
            * (one - e.qm)
            * alpha_base
            * alpha;

        // y1^2 = x1^3 - 17, so x1^4 = (y1^2 + 17) x1
        let x1_pow_4 = (y1_sqr + GRUMPKIN_B_NEGATED) * x1;
        let x_double = ((x3 + x1.double()) * y1_sqr * Fr::from(4u64) - x1_pow_4 * Fr::from(9u64))
            * alpha_base
            * e.qm;
        let y_double = (x1.square() * Fr::from(3u64) * (x1 - x3) - y1.double() * (y1 + y3))
            * alpha_base
            * alpha
            * e.qm;

        (x_add + y_add + x_double + y_double) * e.q_elliptic
    }
}

impl Widget for AuxiliaryWidget {
    fn name(&self) -> &'static str {
        "auxiliary"
    }

    fn num_alpha_powers(&self) -> u32 {
        3
    }

    /// Non-native field multiplication, limb accumulation, and ROM/RAM
    /// memory consistency.
    fn evaluate(&self, inputs: &WidgetInputs, alpha_base: Fr) -> Fr {
        let e = inputs.evals;
        let c = inputs.challenges;
        let one = Fr::one();

        let non_native_field = non_native_field_identity(e);
        let limb_accumulator = limb_accumulator_identity(e);

        // Memory record `w1 + η·w2 + η²·w3 + qc`, compared against w4.
        let partial_record_check = ((e.w3 * c.eta + e.w2) * c.eta + e.w1) * c.eta + e.qc;
        let memory_record_check = partial_record_check - e.w4;

        let index_delta = e.w1_omega - e.w1;
        let record_delta = e.w4_omega - e.w4;
        let index_is_monotonically_increasing = index_delta * (index_delta - one);
        let adjacent_values_match = record_delta * (one - index_delta);

        let rom_consistency = (adjacent_values_match * c.alpha
            + index_is_monotonically_increasing)
            * c.alpha
            + memory_record_check;

        let ram_consistency = ram_consistency_identity(
            e,
            c,
            index_delta,
            partial_record_check,
            index_is_monotonically_increasing,
        );

        let timestamp_delta = e.w2_omega - e.w2;
        let ram_timestamp_check = (one - index_delta) * timestamp_delta - e.w3;

        let memory = (rom_consistency * e.q2 + ram_timestamp_check * e.q4 + memory_record_check * e.qm)
            * e.q1
            + ram_consistency * e.q_arith;

        (memory + non_native_field + limb_accumulator) * e.q_aux * alpha_base
    }
}

fn non_native_field_identity(e: &ProofEvaluations) -> Fr {
    let mut limb_subproduct = e.w1 * e.w2_omega + e.w1_omega * e.w2;

    let gate_2 = ((e.w1 * e.w4 + e.w2 * e.w3 - e.w3_omega) * LIMB_SIZE - e.w4_omega
        + limb_subproduct)
        * e.q4;

    limb_subproduct = limb_subproduct * LIMB_SIZE + e.w1_omega * e.w2_omega;

    let gate_1 = (limb_subproduct - (e.w3 + e.w4)) * e.q3;
    let gate_3 = (limb_subproduct + e.w4 - (e.w3_omega + e.w4_omega)) * e.qm;

    (gate_1 + gate_2 + gate_3) * e.q2
}

fn limb_accumulator_identity(e: &ProofEvaluations) -> Fr {
    let accumulate = |limbs: [Fr; 5]| {
        limbs
            .into_iter()
            .fold(Fr::from(0u64), |acc, limb| acc * SUBLIMB_SHIFT + limb)
    };
    let accumulator_1 = (accumulate([e.w2_omega, e.w1_omega, e.w3, e.w2, e.w1]) - e.w4) * e.q4;
    let accumulator_2 =
        (accumulate([e.w3_omega, e.w2_omega, e.w1_omega, e.w4, e.w3]) - e.w4_omega) * e.qm;
    (accumulator_1 + accumulator_2) * e.q3
}

fn ram_consistency_identity(
    e: &ProofEvaluations,
    c: &Challenges,
    index_delta: Fr,
    partial_record_check: Fr,
    index_is_monotonically_increasing: Fr,
) -> Fr {
    let one = Fr::one();
    let next_gate_access_type =
        e.w4_omega - ((e.w3_omega * c.eta + e.w2_omega) * c.eta + e.w1_omega) * c.eta;
    let value_delta = e.w3_omega - e.w3;

    let adjacent_values_match_on_read =
        (one - index_delta) * value_delta * (one - next_gate_access_type);

    let access_type = e.w4 - partial_record_check;
    let access_check = access_type * (access_type - one);
    let next_gate_access_type_is_boolean = next_gate_access_type * (next_gate_access_type - one);

    ((adjacent_values_match_on_read * c.alpha + index_is_monotonically_increasing) * c.alpha
        + next_gate_access_type_is_boolean)
        * c.alpha
        + access_check
}
