use std::path::PathBuf;

use tabled::Table;

use crate::{contributions, error, info, management::ReportWriter, success, warning};

pub async fn contributions(path: PathBuf, output_dir: PathBuf, top: usize) {
    info!("Parsing contributions from {}", path.display());

    let report = match contributions::parse_file(&path).await {
        Ok(report) => report,
        Err(e) => error!("Error reading file: {}", e),
    };

    if report.contributions.is_empty() {
        warning!("No shared links found in {}", path.display());
    }

    match ReportWriter::new(output_dir).write(&report).await {
        Ok([csv, detailed]) => {
            success!("Reports generated successfully!");
            info!("{}: Summary of user contributions", csv.display());
            info!("{}: Detailed breakdown with track links", detailed.display());
        }
        Err(e) => error!("Failed to write reports: {}", e),
    }

    println!(
        "\nTotal users: {}\nTotal tracks shared: {}\n",
        report.total_users(),
        report.total_links()
    );

    let rows = contributions::table_rows(&report, top);
    if !rows.is_empty() {
        println!("Top contributors:\n{}", Table::new(rows));
    }
}
