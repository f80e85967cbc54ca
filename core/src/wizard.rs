//! Multi-step forms as explicit state machines.
//!
//! A wizard starts at step 0, moves forward only when the current step
//! validates, and ends in `Submitted` once every step passes.

use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;

use crate::model::job::JobRecord;
use crate::time::{parse_hours, parse_log_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    Step(usize),
    Submitted,
}

pub trait WizardForm {
    type Output;

    const STEPS: usize;

    fn step_title(&self, step: usize) -> &'static str;
    fn validate_step(&self, step: usize) -> Result<()>;
    fn build(&self) -> Result<Self::Output>;
}

pub struct Wizard<F: WizardForm> {
    form: F,
    state: WizardState,
}

impl<F: WizardForm> Wizard<F> {
    pub fn new(form: F) -> Self {
        Self { form, state: WizardState::Step(0) }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn current_step(&self) -> Option<usize> {
        match self.state {
            WizardState::Step(i) => Some(i),
            WizardState::Submitted => None,
        }
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step() == Some(F::STEPS.saturating_sub(1))
    }

    /// Validates the current step and advances. Returns `true` when the
    /// wizard moved, `false` when already on the last step.
    pub fn next(&mut self) -> Result<bool> {
        let step = self.current_step().ok_or_else(|| anyhow!("Wizard already submitted"))?;
        self.form.validate_step(step)?;
        if step + 1 < F::STEPS {
            self.state = WizardState::Step(step + 1);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn back(&mut self) {
        if let WizardState::Step(i) = self.state {
            if i > 0 {
                self.state = WizardState::Step(i - 1);
            }
        }
    }

    pub fn submit(&mut self) -> Result<F::Output> {
        if self.state == WizardState::Submitted {
            bail!("Wizard already submitted");
        }
        for step in 0..F::STEPS {
            if let Err(e) = self.form.validate_step(step) {
                self.state = WizardState::Step(step);
                return Err(e);
            }
        }
        let output = self.form.build()?;
        self.state = WizardState::Submitted;
        Ok(output)
    }
}

pub const JOB_STEP_NAME: usize = 0;
pub const JOB_STEP_START: usize = 1;
pub const JOB_STEP_HOURS: usize = 2;
pub const JOB_STEP_CONFIRM: usize = 3;

/// Collects a job record: name, start date, required hours, confirmation.
#[derive(Debug, Clone, Default)]
pub struct JobSetupForm {
    pub name: String,
    pub start_date: String,
    pub total_hours: String,
    pub confirmed: bool,
    start_locked: bool,
    today: Option<NaiveDate>,
}

impl JobSetupForm {
    pub fn new(today: NaiveDate) -> Self {
        Self { today: Some(today), ..Self::default() }
    }

    /// Prefills the fields from a stored record.
    pub fn from_job(job: &JobRecord, today: NaiveDate) -> Self {
        Self {
            name: job.name.clone().unwrap_or_default(),
            start_date: job.start_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            total_hours: job.total_hours.map(|h| h.to_string()).unwrap_or_default(),
            confirmed: false,
            start_locked: false,
            today: Some(today),
        }
    }

    /// Keeps the prefilled start date; input for that step is ignored.
    pub fn lock_start(&mut self) {
        self.start_locked = true;
    }

    pub fn is_start_locked(&self) -> bool {
        self.start_locked
    }

    pub fn set_input(&mut self, step: usize, input: &str) {
        let input = input.trim().to_string();
        match step {
            JOB_STEP_NAME => self.name = input,
            JOB_STEP_START if self.start_locked => {}
            JOB_STEP_START => self.start_date = input,
            JOB_STEP_HOURS => self.total_hours = input,
            JOB_STEP_CONFIRM => {
                self.confirmed = matches!(input.to_lowercase().as_str(), "y" | "yes")
            }
            _ => {}
        }
    }

    fn parsed_start(&self) -> Result<NaiveDate> {
        let today = self.today.ok_or_else(|| anyhow!("Form has no reference date"))?;
        parse_log_date(&self.start_date, today)
    }

    fn parsed_hours(&self) -> Result<f64> {
        let hours = parse_hours(&self.total_hours)?;
        if hours <= 0.0 {
            bail!("Required hours must be greater than zero");
        }
        Ok(hours)
    }
}

impl WizardForm for JobSetupForm {
    type Output = JobRecord;
    const STEPS: usize = 4;

    fn step_title(&self, step: usize) -> &'static str {
        match step {
            JOB_STEP_NAME => "Company or placement name (optional)",
            JOB_STEP_START => "Start date (YYYY-MM-DD, today, -3d, mon...)",
            JOB_STEP_HOURS => "Required hours",
            JOB_STEP_CONFIRM => "Save this job? (y/n)",
            _ => "",
        }
    }

    fn validate_step(&self, step: usize) -> Result<()> {
        match step {
            JOB_STEP_NAME => Ok(()),
            JOB_STEP_START => self.parsed_start().map(|_| ()),
            JOB_STEP_HOURS => self.parsed_hours().map(|_| ()),
            JOB_STEP_CONFIRM if self.confirmed => Ok(()),
            JOB_STEP_CONFIRM => Err(anyhow!("Not confirmed")),
            _ => Err(anyhow!("Unknown step {}", step)),
        }
    }

    fn build(&self) -> Result<JobRecord> {
        let name = if self.name.is_empty() { None } else { Some(self.name.clone()) };
        Ok(JobRecord::new(name, self.parsed_start()?, self.parsed_hours()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 7).unwrap()
    }

    #[test]
    fn test_walk_through_job_setup() {
        let mut wizard = Wizard::new(JobSetupForm::new(today()));
        assert_eq!(wizard.state(), WizardState::Step(0));

        wizard.form_mut().set_input(JOB_STEP_NAME, "Acme Corp");
        assert!(wizard.next().unwrap());

        wizard.form_mut().set_input(JOB_STEP_START, "2025-05-01");
        assert!(wizard.next().unwrap());

        wizard.form_mut().set_input(JOB_STEP_HOURS, "486");
        assert!(wizard.next().unwrap());
        assert!(wizard.is_last_step());

        wizard.form_mut().set_input(JOB_STEP_CONFIRM, "y");
        assert!(!wizard.next().unwrap());

        let job = wizard.submit().unwrap();
        assert_eq!(wizard.state(), WizardState::Submitted);
        assert_eq!(job.name.as_deref(), Some("Acme Corp"));
        assert_eq!(job.start_date, NaiveDate::from_ymd_opt(2025, 5, 1));
        assert_eq!(job.total_hours, Some(486.0));

        assert!(wizard.submit().is_err());
        assert!(wizard.next().is_err());
    }

    #[test]
    fn test_invalid_step_does_not_advance() {
        let mut wizard = Wizard::new(JobSetupForm::new(today()));
        wizard.next().unwrap();

        wizard.form_mut().set_input(JOB_STEP_START, "whenever");
        assert!(wizard.next().is_err());
        assert_eq!(wizard.state(), WizardState::Step(JOB_STEP_START));

        wizard.form_mut().set_input(JOB_STEP_START, "-6d");
        wizard.next().unwrap();
        wizard.form_mut().set_input(JOB_STEP_HOURS, "0");
        assert!(wizard.next().is_err());
        assert_eq!(wizard.state(), WizardState::Step(JOB_STEP_HOURS));
    }

    #[test]
    fn test_back() {
        let mut wizard = Wizard::new(JobSetupForm::new(today()));
        wizard.back();
        assert_eq!(wizard.state(), WizardState::Step(0));

        wizard.next().unwrap();
        wizard.back();
        assert_eq!(wizard.state(), WizardState::Step(0));
    }

    #[test]
    fn test_submit_jumps_to_first_invalid_step() {
        let job = JobRecord { total_hours: Some(300.0), ..JobRecord::default() };
        let mut wizard = Wizard::new(JobSetupForm::from_job(&job, today()));
        wizard.form_mut().set_input(JOB_STEP_CONFIRM, "yes");

        assert!(wizard.submit().is_err());
        assert_eq!(wizard.state(), WizardState::Step(JOB_STEP_START));
    }

    #[test]
    fn test_locked_start_ignores_input() {
        let job = JobRecord::new(None, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(), 300.0);
        let mut form = JobSetupForm::from_job(&job, today());
        form.lock_start();
        assert!(form.is_start_locked());

        form.set_input(JOB_STEP_START, "2025-06-01");
        form.set_input(JOB_STEP_HOURS, "486");
        form.set_input(JOB_STEP_CONFIRM, "y");
        assert_eq!(form.start_date, "2025-05-01");

        let saved = Wizard::new(form).submit().unwrap();
        assert_eq!(saved.start_date, NaiveDate::from_ymd_opt(2025, 5, 1));
        assert_eq!(saved.total_hours, Some(486.0));
    }

    #[test]
    fn test_step_count() {
        assert_eq!(JobSetupForm::STEPS, JOB_STEP_CONFIRM + 1);
    }
}
