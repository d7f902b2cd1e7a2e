//! Feature preparation pipeline - the fixed stage list and its driver
//!
//! Each stage is a fit step (statistics from the training set, or from the
//! union of both sets for encoding) followed by a pure transform applied to
//! both record sets. Frames are never mutated in place; every stage returns
//! new `DataFrame`s.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::encode::{encode_categoricals, fit_encodings, CategoricalEncoding};
use super::error::{PrepError, PrepResult};
use super::features::{add_family_size, add_is_alone, add_title};
use super::impute::{
    count_missing, fit_median, fit_mode, impute_age, impute_cabin, impute_embarked,
    DEFAULT_CABIN_FILL,
};
use super::schema::{validate_inputs, AGE, CABIN, DEFAULT_TARGET, EMBARKED, ENCODED_COLUMNS, TITLE};

/// Settings for a preparation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepConfig {
    /// Training label; required in the training set, optional in the held-out set
    pub target: String,
    /// Category written into missing Cabin values
    pub cabin_fill: String,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            cabin_fill: DEFAULT_CABIN_FILL.to_string(),
        }
    }
}

/// Statistics learned while preparing, reusable on further record sets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FittedParameters {
    pub age_median: Option<f64>,
    pub embarked_mode: Option<String>,
    pub encodings: Vec<CategoricalEncoding>,
}

impl FittedParameters {
    /// Names of all indicator columns, in output order
    pub fn indicator_columns(&self) -> Vec<String> {
        self.encodings
            .iter()
            .flat_map(|e| e.indicator_names())
            .collect()
    }

    fn require_age_median(&self) -> PrepResult<f64> {
        self.age_median
            .ok_or_else(|| PrepError::data("Age median has not been fitted"))
    }

    fn require_embarked_mode(&self) -> PrepResult<&str> {
        self.embarked_mode
            .as_deref()
            .ok_or_else(|| PrepError::data("Embarked mode has not been fitted"))
    }
}

/// One step of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ImputeAge,
    ImputeCabin,
    ImputeEmbarked,
    ExtractTitle,
    FamilySize,
    IsAlone,
    EncodeCategoricals,
}

/// Stages in execution order
pub const STAGES: [Stage; 7] = [
    Stage::ImputeAge,
    Stage::ImputeCabin,
    Stage::ImputeEmbarked,
    Stage::ExtractTitle,
    Stage::FamilySize,
    Stage::IsAlone,
    Stage::EncodeCategoricals,
];

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::ImputeAge => "Age imputation",
            Stage::ImputeCabin => "Cabin imputation",
            Stage::ImputeEmbarked => "Embarked imputation",
            Stage::ExtractTitle => "Title extraction",
            Stage::FamilySize => "Family size",
            Stage::IsAlone => "IsAlone flag",
            Stage::EncodeCategoricals => "Categorical encoding",
        }
    }

    /// Learn this stage's statistic. Only the training set is consulted,
    /// except for encoding which needs the category union of both sets.
    pub fn fit(
        &self,
        train: &DataFrame,
        holdout: &DataFrame,
        params: &mut FittedParameters,
    ) -> PrepResult<()> {
        match self {
            Stage::ImputeAge => params.age_median = Some(fit_median(train, AGE)?),
            Stage::ImputeEmbarked => params.embarked_mode = Some(fit_mode(train, EMBARKED)?),
            Stage::EncodeCategoricals => {
                params.encodings = fit_encodings(train, holdout, &ENCODED_COLUMNS)?
            }
            Stage::ImputeCabin | Stage::ExtractTitle | Stage::FamilySize | Stage::IsAlone => {}
        }
        Ok(())
    }

    /// Apply this stage to a single record set
    pub fn transform(
        &self,
        df: &DataFrame,
        config: &PrepConfig,
        params: &FittedParameters,
    ) -> PrepResult<DataFrame> {
        match self {
            Stage::ImputeAge => impute_age(df, params.require_age_median()?),
            Stage::ImputeCabin => impute_cabin(df, &config.cabin_fill),
            Stage::ImputeEmbarked => impute_embarked(df, params.require_embarked_mode()?),
            Stage::ExtractTitle => add_title(df),
            Stage::FamilySize => add_family_size(df),
            Stage::IsAlone => add_is_alone(df),
            Stage::EncodeCategoricals => encode_categoricals(df, &params.encodings),
        }
    }
}

/// Missing values per column, before and after the pipeline touched them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingCount {
    pub column: String,
    pub training: usize,
    pub holdout: usize,
}

/// Bookkeeping gathered during a run, for reporting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrepStats {
    pub training_rows: usize,
    pub holdout_rows: usize,
    pub input_columns: usize,
    pub output_columns: usize,
    /// Values filled by the imputation stages
    pub filled: Vec<MissingCount>,
    /// Rows whose Name carried no recognisable title
    pub untitled: Option<MissingCount>,
}

/// Output of [`prepare`]
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub train: DataFrame,
    pub holdout: DataFrame,
    pub params: FittedParameters,
    pub stats: PrepStats,
}

fn missing_count(train: &DataFrame, holdout: &DataFrame, column: &str) -> PrepResult<MissingCount> {
    Ok(MissingCount {
        column: column.to_string(),
        training: count_missing(train, column)?,
        holdout: count_missing(holdout, column)?,
    })
}

/// Run one stage's transform on both record sets side by side
fn transform_both(
    stage: Stage,
    train: &DataFrame,
    holdout: &DataFrame,
    config: &PrepConfig,
    params: &FittedParameters,
) -> PrepResult<(DataFrame, DataFrame)> {
    let (train_out, holdout_out) = rayon::join(
        || stage.transform(train, config, params),
        || stage.transform(holdout, config, params),
    );
    Ok((train_out?, holdout_out?))
}

/// Prepare a training set and a held-out set.
///
/// Statistics are fitted on `train` (and on the category union for encoding)
/// and applied identically to both. Returns both prepared frames with an
/// identical set of encoded columns, together with the fitted parameters.
///
/// # Errors
/// * [`PrepError::Schema`] - missing/mistyped required columns, mismatched
///   column sets or dtypes, missing or overflowing SibSp/Parch, indicator
///   name clashes
/// * [`PrepError::Data`] - no non-missing training Age or Embarked values
pub fn prepare(
    train: &DataFrame,
    holdout: &DataFrame,
    config: &PrepConfig,
) -> PrepResult<PreparedData> {
    validate_inputs(train, holdout, &config.target)?;

    let mut stats = PrepStats {
        training_rows: train.height(),
        holdout_rows: holdout.height(),
        input_columns: train.width(),
        ..Default::default()
    };
    for column in [AGE, CABIN, EMBARKED] {
        stats.filled.push(missing_count(train, holdout, column)?);
    }

    let mut params = FittedParameters::default();
    let mut current = (train.clone(), holdout.clone());

    for stage in STAGES {
        if stage == Stage::EncodeCategoricals {
            stats.untitled = Some(missing_count(&current.0, &current.1, TITLE)?);
        }
        stage.fit(&current.0, &current.1, &mut params)?;
        current = transform_both(stage, &current.0, &current.1, config, &params)?;
    }

    let (train, holdout) = current;
    stats.output_columns = train.width();

    Ok(PreparedData {
        train,
        holdout,
        params,
        stats,
    })
}

/// Apply previously fitted parameters to another record set without refitting
pub fn transform_record_set(
    df: &DataFrame,
    config: &PrepConfig,
    params: &FittedParameters,
) -> PrepResult<DataFrame> {
    super::schema::validate_record_set(df, "input")?;
    STAGES
        .iter()
        .try_fold(df.clone(), |acc, stage| stage.transform(&acc, config, params))
}
