use super::schedule::{FepSchedule, ScheduleError, ScheduleKey};
use std::fmt;

/// Ordered engine run parameters for a single lambda window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MdpParameters {
    entries: Vec<(&'static str, String)>,
}

impl MdpParameters {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, key: &'static str, value: impl ToString) {
        self.entries.push((key, value.to_string()));
    }
}

impl fmt::Display for MdpParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.entries {
            writeln!(f, "{:<24} = {}", key, value)?;
        }
        Ok(())
    }
}

impl FepSchedule {
    /// Free-energy parameters for the window at `index`, decoupling `moltype`.
    pub fn mdp_parameters(
        &self,
        index: usize,
        moltype: &str,
    ) -> Result<MdpParameters, ScheduleError> {
        let lambdas = self.require_lambdas()?;
        self.lambda(index)?;

        let text = |value: &Option<String>, key: ScheduleKey| {
            value.clone().ok_or_else(|| self.missing(key))
        };
        let couple_lambda0 = text(&self.couple_lambda0, ScheduleKey::CoupleLambda0)?;
        let couple_lambda1 = text(&self.couple_lambda1, ScheduleKey::CoupleLambda1)?;
        let sc_alpha = self.sc_alpha.ok_or_else(|| self.missing(ScheduleKey::ScAlpha))?;
        let sc_power = self.sc_power.ok_or_else(|| self.missing(ScheduleKey::ScPower))?;
        let sc_sigma = self.sc_sigma.ok_or_else(|| self.missing(ScheduleKey::ScSigma))?;

        let fep_lambdas: Vec<String> = lambdas.iter().map(ToString::to_string).collect();

        let mut params = MdpParameters::default();
        params.push("free-energy", "yes");
        params.push("couple-moltype", moltype);
        params.push("couple-lambda0", couple_lambda0);
        params.push("couple-lambda1", couple_lambda1);
        params.push("couple-intramol", "no");
        params.push("sc-alpha", sc_alpha);
        params.push("sc-power", sc_power);
        params.push("sc-sigma", sc_sigma);
        params.push("init-lambda-state", index);
        params.push("fep-lambdas", fep_lambdas.join(" "));
        params.push("calc-lambda-neighbors", -1);
        params.push("separate-dhdl-file", "yes");
        Ok(params)
    }
}
