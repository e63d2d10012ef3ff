//! Adversarial step generator

#[cfg(kani)]
use kani::any;
#[cfg(kani)]
use model_safety::state::*;
#[cfg(kani)]
use model_safety::transitions::*;
#[cfg(kani)]
use crate::generators::*;
#[cfg(kani)]
use crate::sanitizer::POOL_ASSETS;

#[derive(Clone, Copy)]
pub enum Step {
    Admit,
    Update,
    Revoke,
    Migrate,
    Remove,
    SetQueue,
    Report,
    Harvest,
}

#[cfg(kani)]
impl kani::Arbitrary for Step {
    fn any() -> Self {
        let choice: u8 = any();
        match choice % 8 {
            0 => Step::Admit,
            1 => Step::Update,
            2 => Step::Revoke,
            3 => Step::Migrate,
            4 => Step::Remove,
            5 => Step::SetQueue,
            6 => Step::Report,
            _ => Step::Harvest,
        }
    }
}

/// Apply one arbitrary transition from an arbitrary caller
///
/// A rejected transition leaves the state exactly as it was.
#[cfg(kani)]
pub fn adversary_step(s: State) -> State {
    let caller = any_caller();
    let block: u64 = (any::<u8>() as u64) % 64;

    let result = match any::<Step>() {
        Step::Admit => admit(&s, &caller, block, any_id(), any_config()),
        Step::Update => update(&s, &caller, &any_id(), any_config()),
        Step::Revoke => revoke(&s, &caller, &any_id()),
        Step::Migrate => migrate(&s, &caller, &any_id(), any_id()),
        Step::Remove => remove_from_queue(&s, &caller, &any_id()),
        Step::SetQueue => {
            let mut slots = [NULL_ID; MAX_QUEUE_SLOTS];
            slots[0] = any_id();
            slots[1] = any_id();
            slots[2] = any_id();
            set_queue(&s, &caller, &slots)
        }
        Step::Report => {
            let gain: u128 = (any::<u16>() as u128) % 1_000;
            report(&s, &caller, block, &any_id(), gain)
        }
        Step::Harvest => {
            let gain: u128 = (any::<u16>() as u128) % 1_000;
            let offered: u128 = any::<u16>() as u128;
            harvest(&s, &POOL_ASSETS, &caller, block, &any_id(), gain, offered).map(|(next, _)| next)
        }
    };

    result.unwrap_or(s)
}
