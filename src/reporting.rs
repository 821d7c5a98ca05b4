use crate::runner::DispatchRun;
use crate::sizing::SizingReport;

pub fn print_dispatch_report(run: &DispatchRun) {
    for r in &run.outcome.records {
        println!("{r}");
    }
    println!("\n{}", run.report);
}

pub fn print_sizing_report(report: &SizingReport) {
    println!("{report}");
}
