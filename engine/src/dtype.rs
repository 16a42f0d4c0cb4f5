use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Weight data types a backend may load, including the hybrid forms where
/// attention and MLP weights use different precisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DType {
    Fp16,
    Bf16,
    Int8,
    W8a8,
    Int4,
    Nf4,
    Bf16Fp16,
    Bf16Int8,
    Bf16W8a8,
    Bf16Int4,
    Bf16Nf4,
    W8a8Int8,
    W8a8Int4,
    W8a8Nf4,
}

impl DType {
    /// Every accepted dtype, in the order the CLI help lists them.
    pub const ALL: [DType; 14] = [
        DType::Fp16,
        DType::Bf16,
        DType::Int8,
        DType::W8a8,
        DType::Int4,
        DType::Nf4,
        DType::Bf16Fp16,
        DType::Bf16Int8,
        DType::Bf16W8a8,
        DType::Bf16Int4,
        DType::Bf16Nf4,
        DType::W8a8Int8,
        DType::W8a8Int4,
        DType::W8a8Nf4,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DType::Fp16 => "fp16",
            DType::Bf16 => "bf16",
            DType::Int8 => "int8",
            DType::W8a8 => "w8a8",
            DType::Int4 => "int4",
            DType::Nf4 => "nf4",
            DType::Bf16Fp16 => "bf16_fp16",
            DType::Bf16Int8 => "bf16_int8",
            DType::Bf16W8a8 => "bf16_w8a8",
            DType::Bf16Int4 => "bf16_int4",
            DType::Bf16Nf4 => "bf16_nf4",
            DType::W8a8Int8 => "w8a8_int8",
            DType::W8a8Int4 => "w8a8_int4",
            DType::W8a8Nf4 => "w8a8_nf4",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown dtype `{0}`")]
pub struct UnknownDType(String);

impl FromStr for DType {
    type Err = UnknownDType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DType::ALL
            .iter()
            .find(|d| d.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownDType(s.to_string()))
    }
}
