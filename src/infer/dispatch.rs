use super::deal::Deal;
use super::exact::Enumerator;
use super::marginals::Marginals;
use super::sample::Sampler;
use crate::constraint::store::Constraints;
use crate::error::Error;
use crate::game::state::State;
use crate::session::config::Config;
use std::time::Instant;

/// the routing policy between the exact and sampled backends.
///
/// small feasible spaces are enumerated outright. otherwise a pilot run
/// probes the rejection acceptance rate: healthy acceptance gets plain
/// rejection sampling, starved acceptance gets the swap chain. every
/// table is audited before it is released.
pub fn posterior(
    state: &State,
    constraints: &Constraints,
    config: &Config,
) -> Result<Marginals, Error> {
    let ref deal = Deal::from((state, constraints));
    let deadline = config.deadline.map(|budget| Instant::now() + budget);
    let workload = deal.workload();
    let marginals = if workload <= config.tau_exact {
        log::debug!("workload {} within exact budget, enumerating", workload);
        Enumerator::new(deal, deadline).marginals()?
    } else {
        let sampler = Sampler::new(deal, config.seed, deadline);
        let alpha = sampler.pilot(config.pilot);
        if alpha >= config.alpha_floor {
            log::debug!("workload {}, acceptance {:.3}, rejection sampling", workload, alpha);
            sampler.rejection(config.target)?.marginals
        } else {
            log::debug!("workload {}, acceptance {:.4}, swap chain", workload, alpha);
            sampler.chain(config.target, config.burn_in)?.marginals
        }
    };
    match marginals.audit(deal) {
        Ok(()) => Ok(marginals),
        Err(fault) => {
            log::error!("marginal table failed its audit: {}", fault);
            Err(fault)
        }
    }
}
