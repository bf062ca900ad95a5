use strum::EnumCount;
use strum_macros::{EnumCount, EnumIter, IntoStaticStr};

use crate::constants::NUM_VK_COMMITMENTS;

/// Selector, permutation and lookup table commitments carried by an UltraPlonk
/// verification key.
///
/// The declaration order is the serialization order: barretenberg writes the
/// commitments from a `std::map`, i.e. sorted by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumCount, IntoStaticStr)]
pub enum VkCommitment {
    #[strum(serialize = "ID_1")]
    Id1,
    #[strum(serialize = "ID_2")]
    Id2,
    #[strum(serialize = "ID_3")]
    Id3,
    #[strum(serialize = "ID_4")]
    Id4,
    #[strum(serialize = "Q_1")]
    Q1,
    #[strum(serialize = "Q_2")]
    Q2,
    #[strum(serialize = "Q_3")]
    Q3,
    #[strum(serialize = "Q_4")]
    Q4,
    #[strum(serialize = "Q_ARITHMETIC")]
    QArithmetic,
    #[strum(serialize = "Q_AUX")]
    QAux,
    #[strum(serialize = "Q_C")]
    QC,
    #[strum(serialize = "Q_ELLIPTIC")]
    QElliptic,
    #[strum(serialize = "Q_M")]
    QM,
    #[strum(serialize = "Q_SORT")]
    QSort,
    #[strum(serialize = "SIGMA_1")]
    Sigma1,
    #[strum(serialize = "SIGMA_2")]
    Sigma2,
    #[strum(serialize = "SIGMA_3")]
    Sigma3,
    #[strum(serialize = "SIGMA_4")]
    Sigma4,
    #[strum(serialize = "TABLE_1")]
    Table1,
    #[strum(serialize = "TABLE_2")]
    Table2,
    #[strum(serialize = "TABLE_3")]
    Table3,
    #[strum(serialize = "TABLE_4")]
    Table4,
    #[strum(serialize = "TABLE_TYPE")]
    TableType,
}

impl VkCommitment {
    pub fn label(self) -> &'static str {
        self.into()
    }
}

const _: () = assert!(<VkCommitment as EnumCount>::COUNT == NUM_VK_COMMITMENTS);
