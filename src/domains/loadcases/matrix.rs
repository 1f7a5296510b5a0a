use super::wave::WaveType;
use super::writer::CaseWriter;
use crate::common::{LoadCaseError, LoadCaseResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

pub const CASE_LIST_FILE: &str = "_CaseList.json";

fn default_stage1_periods() -> f64 {
    5.0
}

fn default_storm_duration() -> f64 {
    10800.0
}

fn default_true() -> bool {
    true
}

/// Wave parameter ranges to permute into load cases.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadCaseMatrix {
    pub wave_type: WaveType,
    /// Directions in degrees.
    pub directions: Vec<f64>,
    /// Wave height (Hs for irregular waves), in metres.
    pub heights: Vec<f64>,
    /// Wave period (Tp for irregular waves), in seconds.
    pub periods: Vec<f64>,
    /// Regular waves: length of the main stage as a multiple of the period.
    #[serde(default = "default_stage1_periods")]
    pub stage1_periods: f64,
    /// Irregular waves: length of the main stage in seconds.
    #[serde(default = "default_storm_duration")]
    pub storm_duration: f64,
    /// Irregular waves: derive the peak enhancement factor from Tp.
    #[serde(default = "default_true")]
    pub calc_gamma: bool,
}

impl LoadCaseMatrix {
    pub fn new(wave_type: WaveType, directions: Vec<f64>, heights: Vec<f64>, periods: Vec<f64>) -> Self {
        Self {
            wave_type,
            directions,
            heights,
            periods,
            stage1_periods: default_stage1_periods(),
            storm_duration: default_storm_duration(),
            calc_gamma: true,
        }
    }

    pub fn case_count(&self) -> usize {
        self.directions.len() * self.heights.len() * self.periods.len()
    }

    fn validate(&self) -> LoadCaseResult<()> {
        for (axis, values) in [
            ("directions", &self.directions),
            ("heights", &self.heights),
            ("periods", &self.periods),
        ] {
            if values.is_empty() {
                return Err(LoadCaseError::EmptyMatrix { axis });
            }
        }
        Ok(())
    }

    /// Enumerate the cases: height, then period, then direction (innermost).
    pub fn cases(&self) -> LoadCaseResult<Vec<LoadCase>> {
        self.validate()?;
        let digits = self.case_count().ilog10() as usize + 1;

        let mut out = Vec::with_capacity(self.case_count());
        for &height in &self.heights {
            for &period in &self.periods {
                for &direction in &self.directions {
                    let number = out.len() + 1;
                    let name = case_name(self.wave_type, number, digits, height, period, direction);
                    out.push(LoadCase {
                        number,
                        file_name: format!("{}.dat", name),
                        name,
                        height,
                        period,
                        direction,
                        environment: WaveEnvironment::for_case(self, height, period, direction),
                    });
                }
            }
        }
        Ok(out)
    }
}

fn case_name(wave_type: WaveType, number: usize, digits: usize, height: f64, period: f64, direction: f64) -> String {
    let (h, t) = if wave_type.is_regular() { ("H", "T") } else { ("Hs", "Tp") };
    format!(
        "LC{:0digits$}_{}={:.2}m_{}={:.2}s_dir={:?}",
        number,
        h,
        height,
        t,
        period,
        direction,
        digits = digits
    )
}

/// Environment settings the engine applies for one case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaveEnvironment {
    pub wave_type: WaveType,
    pub direction: f64,
    pub height: f64,
    pub period: f64,
    /// JONSWAP peak enhancement factor, irregular waves only.
    pub gamma: Option<f64>,
    pub wave_time_origin: Option<f64>,
    /// Build-up stage and main stage durations, in seconds.
    pub stage_durations: [f64; 2],
}

impl WaveEnvironment {
    fn for_case(matrix: &LoadCaseMatrix, height: f64, period: f64, direction: f64) -> Self {
        if matrix.wave_type.is_regular() {
            Self {
                wave_type: matrix.wave_type,
                direction,
                height,
                period,
                gamma: None,
                wave_time_origin: None,
                stage_durations: [period, matrix.stage1_periods * period],
            }
        } else {
            Self {
                wave_type: matrix.wave_type,
                direction,
                height,
                period,
                gamma: matrix.calc_gamma.then(|| jonswap_gamma(period)),
                wave_time_origin: Some(0.0),
                stage_durations: [period, matrix.storm_duration],
            }
        }
    }
}

/// Peak enhancement factor as a function of the peak period.
pub fn jonswap_gamma(tp: f64) -> f64 {
    6.4 * tp.powf(-0.491)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadCase {
    pub number: usize,
    pub name: String,
    pub file_name: String,
    pub height: f64,
    pub period: f64,
    pub direction: f64,
    pub environment: WaveEnvironment,
}

/// One row of the case list written next to the generated files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseListRow {
    pub file: String,
    pub height: f64,
    pub period: f64,
    pub direction: f64,
}

impl From<&LoadCase> for CaseListRow {
    fn from(case: &LoadCase) -> Self {
        Self {
            file: case.file_name.clone(),
            height: case.height,
            period: case.period,
            direction: case.direction,
        }
    }
}

/// Write every case of `matrix` into `out_dir` and the case list next to them.
pub fn generate_load_cases(
    matrix: &LoadCaseMatrix,
    out_dir: &Path,
    writer: &dyn CaseWriter,
) -> LoadCaseResult<Vec<CaseListRow>> {
    let cases = matrix.cases()?;
    fs::create_dir_all(out_dir)?;

    let mut rows = Vec::with_capacity(cases.len());
    for case in &cases {
        writer.write_case(case, &out_dir.join(&case.file_name))?;
        rows.push(CaseListRow::from(case));
    }

    let list = serde_json::to_string_pretty(&rows)?;
    fs::write(out_dir.join(CASE_LIST_FILE), list)?;
    info!(cases = rows.len(), dir = %out_dir.display(), "load cases generated");
    Ok(rows)
}
