//! End-to-end conversion pipeline.
//!
//! Ties the stages together: drawing document → profile chaining →
//! annotation extraction → feature detection → solid construction → STEP
//! export. Each run produces a [`ConversionReport`] describing what was
//! recognized and which secondary features were skipped.

use crate::annotations::{AnnotationExtractor, AnnotationSet};
use crate::builder::ModelBuilder;
use crate::config::Config;
use crate::drawing::DrawingDocument;
use crate::error::ConvertError;
use crate::features::{detect_features, Feature};
use crate::kernel::GeometryKernel;
use crate::profile::{chain_profiles, Profile};
use std::path::Path;
use tracing::info;

/// What a successful conversion recognized and built.
#[derive(Debug)]
pub struct ConversionReport {
    pub profiles: Vec<Profile>,
    pub annotations: AnnotationSet,
    pub features: Vec<Feature>,
    /// Diagnostics from secondary features that were skipped.
    pub warnings: Vec<ConvertError>,
}

/// Terminal failure of a conversion run.
///
/// Keeps the warnings accumulated before the run aborted, so the caller
/// always sees the full ordered diagnostic log whatever the outcome.
#[derive(Debug)]
pub struct ConversionFailure {
    pub error: ConvertError,
    pub warnings: Vec<ConvertError>,
}

impl From<ConvertError> for ConversionFailure {
    fn from(error: ConvertError) -> Self {
        Self { error, warnings: Vec::new() }
    }
}

pub struct Converter<K: GeometryKernel> {
    kernel: K,
    config: Config,
}

impl<K: GeometryKernel> Converter<K> {
    pub fn new(kernel: K, config: Config) -> Self {
        Self { kernel, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full pipeline and write the resulting solid to `output`.
    pub fn convert(
        &self,
        document: &DrawingDocument,
        output: &Path,
    ) -> Result<ConversionReport, ConversionFailure> {
        let (report, solid) = self.reconstruct(document)?;
        if let Err(err) = self.kernel.export_step(&solid, output) {
            return Err(ConversionFailure { error: err.into(), warnings: report.warnings });
        }
        info!(output = %output.display(), "STEP file written");
        Ok(report)
    }

    /// Run the pipeline up to the finished solid without exporting.
    pub fn reconstruct(
        &self,
        document: &DrawingDocument,
    ) -> Result<(ConversionReport, K::Solid), ConvertError> {
        if document.curves.is_empty() {
            return Err(ConvertError::NoGeometry);
        }
        info!(
            curves = document.curves.len(),
            texts = document.texts.len(),
            dimensions = document.dimensions.len(),
            "drawing loaded"
        );

        let annotations = AnnotationExtractor::new().extract(&document.texts, &document.dimensions);

        let profiles = chain_profiles(&document.curves, &self.config);
        if profiles.is_empty() {
            return Err(ConvertError::NoProfile { edge_count: document.curves.len() });
        }
        info!(profiles = profiles.len(), "profiles chained");

        let features = detect_features(&profiles, &annotations, &self.config)?;
        info!(features = features.len(), "features detected");

        let builder = ModelBuilder::new(&self.kernel, &self.config);
        let built = builder.build(&features, &profiles)?;

        let report = ConversionReport {
            profiles,
            annotations,
            features,
            warnings: built.warnings,
        };
        Ok((report, built.solid))
    }
}
