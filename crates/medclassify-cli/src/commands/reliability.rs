//! Reliability command implementation.

use crate::cli::MetadataArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use medclassify_domain::MetadataInput;
use medclassify_reliability::ReliabilityAssessor;

/// Execute the reliability command.
pub fn execute_reliability(args: MetadataArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let metadata: MetadataInput = args.into();
    if metadata.is_blank() {
        eprintln!("{}", formatter.warning("No metadata given; the base score applies"));
    }

    let assessor = ReliabilityAssessor::new(config.reliability.clone())?;
    let result = match config.pipeline.reference_year {
        Some(year) => assessor.assess(&metadata, year),
        None => assessor.assess_now(&metadata),
    };
    println!("{}", formatter.format_reliability(&result)?);
    Ok(())
}
