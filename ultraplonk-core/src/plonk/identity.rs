use ark_bn254::Fr;

use super::challenges::Challenges;
use super::proof::ProofEvaluations;
use super::public_inputs::permutation_delta;
use super::widgets::{evaluate_all, WidgetInputs};
use crate::poly::domain::EvaluationDomain;
use crate::poly::fraction::batch_evaluate;
use crate::poly::lagrange::{l_end, l_start, plookup_delta, vanishing_inverse};

/// Values at `ζ` that do not depend on the proof's evaluations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LagrangeTerms {
    pub public_input_delta: Fr,
    pub plookup_delta: Fr,
    pub l_start: Fr,
    pub l_end: Fr,
    /// `1 / Z*(ζ)`
    pub zero_poly_inverse: Fr,
}

impl LagrangeTerms {
    /// `None` if `ζ` hits a root of one of the denominators, which an honest
    /// transcript does with negligible probability.
    pub fn compute(
        domain: &EvaluationDomain,
        challenges: &Challenges,
        public_inputs: &[Fr],
    ) -> Option<Self> {
        let Challenges {
            beta,
            gamma,
            zeta,
            zeta_pow_n,
            ..
        } = *challenges;
        let [public_input_delta, plookup_delta, l_start, l_end, zero_poly_inverse] =
            batch_evaluate([
                permutation_delta(public_inputs, domain, beta, gamma),
                plookup_delta(domain, beta, gamma),
                l_start(domain, zeta, zeta_pow_n),
                l_end(domain, zeta, zeta_pow_n),
                vanishing_inverse(domain, zeta, zeta_pow_n),
            ])?;
        Some(Self {
            public_input_delta,
            plookup_delta,
            l_start,
            l_end,
            zero_poly_inverse,
        })
    }
}

/// The value `t(ζ)` must take if every relation holds, i.e. the α-combined
/// widget sum divided by the vanishing polynomial.
#[tracing::instrument(skip_all, name = "identity::quotient_evaluation")]
pub fn quotient_evaluation(
    evals: &ProofEvaluations,
    challenges: &Challenges,
    terms: &LagrangeTerms,
) -> Fr {
    let inputs = WidgetInputs {
        evals,
        challenges,
        l_start: terms.l_start,
        l_end: terms.l_end,
        public_input_delta: terms.public_input_delta,
        plookup_delta: terms.plookup_delta,
    };
    evaluate_all(&inputs) * terms.zero_poly_inverse
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::{One, UniformRand};
    use ark_std::test_rng;

    #[test]
    fn terms_match_individual_fractions() {
        let mut rng = test_rng();
        let domain = EvaluationDomain::new(32).unwrap();
        let mut r = || Fr::rand(&mut rng);
        let challenges = Challenges::from_rounds(r(), r(), r(), r(), r(), &domain);
        let inputs = [Fr::from(10u64), Fr::from(11u64)];

        let terms = LagrangeTerms::compute(&domain, &challenges, &inputs).unwrap();
        let expected_delta = permutation_delta(&inputs, &domain, challenges.beta, challenges.gamma)
            .evaluate()
            .unwrap();
        assert_eq!(terms.public_input_delta, expected_delta);
        assert_eq!(
            terms.l_start,
            l_start(&domain, challenges.zeta, challenges.zeta_pow_n)
                .evaluate()
                .unwrap()
        );
        // Z*(ζ) has a root at every row except the last four
        let unmasked_rows: Fr = domain
            .powers_of_root(32 - 4)
            .map(|w| challenges.zeta - w)
            .product();
        assert!((terms.zero_poly_inverse * unmasked_rows).is_one());
    }

    #[test]
    fn zeta_in_domain_is_rejected() {
        let domain = EvaluationDomain::new(8).unwrap();
        let challenges = Challenges::from_rounds(
            Fr::from(2u64),
            Fr::from(3u64),
            Fr::from(5u64),
            Fr::from(7u64),
            domain.root,
            &domain,
        );
        assert!(challenges.zeta_pow_n.is_one());
        assert_eq!(LagrangeTerms::compute(&domain, &challenges, &[]), None);
    }
}
