//! Episode driver: the reset/act/step loop, with observer hooks.

use chrono::NaiveDateTime;

use crate::agent::Agent;
use crate::engine::CityEnv;
use crate::error::EnvResult;
use crate::observer::EnvObserver;

/// Run one full episode over `[start, end)` and return the total reward.
pub fn run_episode<A: Agent, O: EnvObserver>(
    env: &mut CityEnv,
    agent: &mut A,
    observer: &mut O,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> EnvResult<f64> {
    let mut obs = env.reset(start, end);
    observer.on_reset(&obs);

    let mut total_reward = 0.0;
    loop {
        let action = agent.act(&obs);
        let (next_obs, reward, done, info) = env.step(&action)?;
        total_reward += reward;
        observer.on_step_end(env.steps(), env.now(), reward, &info);
        obs = next_obs;
        if done {
            break;
        }
    }

    observer.on_episode_end(total_reward);
    Ok(total_reward)
}
