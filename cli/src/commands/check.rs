use anyhow::Result;
use zuerihunde::{Dataset, UnmatchedPolicy};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::CheckArgs) -> Result<()> {
    let data_dir = &args.data;
    let policy = if args.strict { UnmatchedPolicy::Deny } else { UnmatchedPolicy::Allow };

    println!("[check] loading data from {}", data_dir.display());
    let data = Dataset::load(data_dir)?;
    let report = data.check(policy)?;

    println!("[check] annual rows: {}", report.annual_rows);
    println!("[check] district rows: {}", report.district_annual_rows);
    println!("[check] 2023 rows: {}", report.district_2023_rows);
    println!("[check] districts in shape file: {}", report.district_count);
    for district in &report.unshaded_districts {
        eprintln!("[check] warning: district {} has no metric row", district);
    }
    for district in &report.unknown_districts {
        eprintln!("[check] warning: district {} has no shape", district);
    }
    println!("[check] ok");

    Ok(())
}
