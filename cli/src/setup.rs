use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use chrono::NaiveDate;
use dtr_core::wizard::{JOB_STEP_CONFIRM, JOB_STEP_HOURS, JOB_STEP_NAME, JOB_STEP_START};
use dtr_core::{JobRecord, JobSetupForm, Wizard, WizardForm};

/// Drives the job setup wizard over stdin. Typing `<` goes back a step,
/// an empty line keeps the value shown in brackets. A stored start date is
/// locked unless `force` is set.
pub fn run_wizard(existing: Option<&JobRecord>, today: NaiveDate, force: bool) -> Result<JobRecord> {
    let form = match existing {
        Some(job) => {
            let mut form = JobSetupForm::from_job(job, today);
            if job.start_date.is_some() && !force {
                form.lock_start();
            }
            form
        }
        None => JobSetupForm::new(today),
    };
    let mut wizard = Wizard::new(form);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(step) = wizard.current_step() {
        if step == JOB_STEP_CONFIRM {
            print_summary(wizard.form());
        }

        if step == JOB_STEP_START && wizard.form().is_start_locked() {
            println!(
                "[{}/{}] Start date: {} (kept, use --force to change)",
                step + 1, JobSetupForm::STEPS, wizard.form().start_date
            );
            wizard.next()?;
            continue;
        }

        let current = current_value(wizard.form(), step);
        if current.is_empty() {
            print!("[{}/{}] {}: ", step + 1, JobSetupForm::STEPS, wizard.form().step_title(step));
        } else {
            print!("[{}/{}] {} [{}]: ", step + 1, JobSetupForm::STEPS, wizard.form().step_title(step), current);
        }
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => bail!("Setup aborted"),
        };
        let line = line.trim();

        if line == "<" {
            wizard.back();
            // Step over the locked start date
            if wizard.current_step() == Some(JOB_STEP_START) && wizard.form().is_start_locked() {
                wizard.back();
            }
            continue;
        }
        if !line.is_empty() || step == JOB_STEP_CONFIRM {
            wizard.form_mut().set_input(step, line);
        }

        if step == JOB_STEP_CONFIRM {
            if wizard.form().validate_step(step).is_err() {
                bail!("Setup cancelled");
            }
            return wizard.submit();
        }

        if let Err(e) = wizard.next() {
            println!("  {}", e);
        }
    }

    bail!("Setup already finished")
}

fn current_value(form: &JobSetupForm, step: usize) -> String {
    match step {
        JOB_STEP_NAME => form.name.clone(),
        JOB_STEP_START => form.start_date.clone(),
        JOB_STEP_HOURS => form.total_hours.clone(),
        _ => String::new(),
    }
}

fn print_summary(form: &JobSetupForm) {
    println!();
    println!("  Name:           {}", if form.name.is_empty() { "-" } else { &form.name });
    println!("  Start date:     {}", form.start_date);
    println!("  Required hours: {}", form.total_hours);
    println!();
}
