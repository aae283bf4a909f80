use crate::core::{CvRecord, Pipeline};
use crate::utils::error::{EtlError, Result};

/// Result of a run that did not hit a fatal error.
#[derive(Debug)]
pub enum RunOutcome {
    Completed { output_path: String, record: CvRecord },
    /// The structuring service failed; nothing was written.
    StructuringFailed(EtlError),
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs extract, transform and load once.
    ///
    /// Extraction and write errors are returned as `Err`. A structuring error
    /// is reported and ends the run with [`RunOutcome::StructuringFailed`].
    pub async fn run(&self) -> Result<RunOutcome> {
        // Extract
        println!("Extracting page 1 text...");
        let raw_text = self.pipeline.extract().await?;
        tracing::info!("Extracted {} chars from page 1", raw_text.chars().count());

        // Transform
        println!("Structuring via the language model...");
        let record = match self.pipeline.transform(raw_text).await {
            Ok(record) => record,
            Err(e) => {
                tracing::error!("Structuring failed: {}", e);
                eprintln!("Error during structuring: {}", e);
                return Ok(RunOutcome::StructuringFailed(e));
            }
        };

        println!("\nStructured page 1:");
        println!("{}", serde_json::to_string_pretty(&record)?);

        // Load
        let output_path = self.pipeline.load(&record).await?;
        tracing::info!("CSV written to {}", output_path);
        println!("Saved in {}", output_path);

        Ok(RunOutcome::Completed {
            output_path,
            record,
        })
    }
}
