use crate::common::LoadCaseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub enum WaveType {
    Airy,
    DeanStream,
    Stokes5th,
    Cnoidal,
    Jonswap,
    Issc,
    OchiHubble,
    Torsethaugen,
    GaussianSwell,
    UserDefinedSpectrum,
    UserSpecifiedComponents,
    TimeHistory,
    ResponseCalculation,
}

impl WaveType {
    pub const ALL: [WaveType; 13] = [
        WaveType::Airy,
        WaveType::DeanStream,
        WaveType::Stokes5th,
        WaveType::Cnoidal,
        WaveType::Jonswap,
        WaveType::Issc,
        WaveType::OchiHubble,
        WaveType::Torsethaugen,
        WaveType::GaussianSwell,
        WaveType::UserDefinedSpectrum,
        WaveType::UserSpecifiedComponents,
        WaveType::TimeHistory,
        WaveType::ResponseCalculation,
    ];

    /// Engine name of the wave type.
    pub fn as_str(self) -> &'static str {
        match self {
            WaveType::Airy => "Airy",
            WaveType::DeanStream => "Dean stream",
            WaveType::Stokes5th => "Stokes' 5th",
            WaveType::Cnoidal => "Cnoidal",
            WaveType::Jonswap => "JONSWAP",
            WaveType::Issc => "ISSC",
            WaveType::OchiHubble => "Ochi-Hubble",
            WaveType::Torsethaugen => "Torsethaugen",
            WaveType::GaussianSwell => "Gaussian swell",
            WaveType::UserDefinedSpectrum => "User defined spectrum",
            WaveType::UserSpecifiedComponents => "User specified components",
            WaveType::TimeHistory => "Time history",
            WaveType::ResponseCalculation => "Response calculation",
        }
    }

    pub fn is_regular(self) -> bool {
        matches!(
            self,
            WaveType::Airy | WaveType::DeanStream | WaveType::Stokes5th | WaveType::Cnoidal
        )
    }
}

impl fmt::Display for WaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaveType {
    type Err = LoadCaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WaveType::ALL
            .iter()
            .copied()
            .find(|w| w.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LoadCaseError::UnknownWaveType(s.to_string()))
    }
}

impl TryFrom<String> for WaveType {
    type Error = LoadCaseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WaveType> for String {
    fn from(value: WaveType) -> Self {
        value.as_str().to_string()
    }
}
