use qvar_core::{
    PortfolioModel, REFERENCE_SCORES, TailEstimate, VarReport, estimate_tail_probability,
    loss_stats, principal_component, scaling_factor,
};

pub struct EstimateCommandConfig<'a> {
    pub backend: &'a str,
    pub base_url: Option<&'a str>,
    pub shots: u64,
    pub alpha: f64,
    pub offline: bool,
    pub output_path: Option<&'a str>,
}

pub fn run(config: EstimateCommandConfig) {
    let model = match PortfolioModel::reference() {
        Ok(model) => model,
        Err(e) => {
            eprintln!("Failed to build the portfolio model: {e}");
            std::process::exit(1);
        }
    };
    println!(
        "Theoretical portfolio mean: {:.4}",
        model.expected_return
    );

    let component = principal_component(
        &model.covariance,
        &model.history,
        &model.mean,
        &REFERENCE_SCORES,
    );
    let k = scaling_factor(&model.weights, &component.vector);
    println!("PCA scaling factor |w·v1|: {k:.4}");

    let loss = match loss_stats(&REFERENCE_SCORES) {
        Ok(loss) => loss,
        Err(e) => {
            eprintln!("Failed to compute loss statistics: {e}");
            std::process::exit(1);
        }
    };

    let tail = if config.offline {
        TailEstimate::demo("offline mode requested")
    } else {
        println!(
            "\nSubmitting {}-shot tail circuit to {}...",
            config.shots, config.backend
        );
        let runtime = super::runtime_config(config.base_url, Some(config.backend));
        estimate_tail_probability(runtime, config.alpha, config.shots)
    };

    match &tail {
        TailEstimate::Measured {
            probability,
            backend,
            job_id,
            ..
        } => println!("Quantum estimated CDF: {probability} (job {job_id} on {backend})"),
        TailEstimate::Fallback {
            probability,
            reason,
        } => println!("Quantum execution skipped ({reason}); using demo value {probability}"),
    }

    let report = match VarReport::build(&model, k, loss, tail, config.alpha) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Failed to reconstruct the VaR: {e}");
            std::process::exit(1);
        }
    };
    println!("VaR (PCA score space): {:.4}", report.score_var);

    println!("\n{}", "=".repeat(40));
    println!(" COMPARISON RESULTS");
    println!("{}", "=".repeat(40));
    println!(
        "Closed-form VaR (reference)    : {:.4}",
        report.reference_var
    );
    println!("VaR (PCA score space)          :  {:.4}", report.score_var);
    println!(
        "Reconstructed portfolio VaR    : {:.4}",
        report.portfolio_var
    );
    println!("{}", "=".repeat(40));
    println!("The reconstructed VaR passes through a one-dimensional PCA");
    println!("approximation, so it does not match the closed-form reference");
    println!("exactly; the scale, however, is corrected.");

    if let Some(path) = config.output_path {
        let json = match serde_json::to_string_pretty(&report) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Failed to serialize the report: {e}");
                std::process::exit(1);
            }
        };
        if let Err(e) = std::fs::write(path, json) {
            eprintln!("Failed to write report to {path}: {e}");
            std::process::exit(1);
        }
        println!("\nReport saved to: {path}");
    }
}
