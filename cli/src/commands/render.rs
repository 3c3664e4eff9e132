use anyhow::Result;
use zuerihunde::{Dataset, UnmatchedPolicy, build_site};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::RenderArgs) -> Result<()> {
    let data_dir = &args.data;
    let out_dir = &args.output.clone().unwrap_or("./site".into());

    println!("[render] loading data from {}", data_dir.display());
    let data = Dataset::load(data_dir)?;

    let report = data.check(UnmatchedPolicy::Allow)?;
    for district in &report.unshaded_districts {
        eprintln!("[render] warning: district {} has no metric row, it stays unshaded", district);
    }
    for district in &report.unknown_districts {
        eprintln!("[render] warning: district {} has no shape", district);
    }

    let site = build_site(&data)?;
    println!("[render] writing {} pages to {}", site.pages().len(), out_dir.display());
    let written = site.write(out_dir, args.force)?;
    if cli.verbose > 0 {
        for path in &written {
            eprintln!("[render] wrote {}", path.display());
        }
    }

    Ok(())
}
