use std::env;

use snake_world::{logging, Action, Placement, World, WorldConfig};
use tracing::{error, info};

const SIZE: (usize, usize) = (10, 10);
const MAX_STEPS: usize = 1_000;

fn main() {
    logging::init();

    let mut args = env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0u64);
    let episodes = args.next().and_then(|s| s.parse().ok()).unwrap_or(1usize);

    let agent = fastrand::Rng::with_seed(seed);
    let config = WorldConfig::default();

    for episode in 0..episodes {
        let rng = fastrand::Rng::with_seed(seed.wrapping_add(episode as u64));
        let mut world = match World::with_rng(SIZE, Placement::Random, config, rng) {
            Ok(world) => world,
            Err(err) => {
                error!("episode {} could not start: {}", episode, err);
                continue;
            }
        };

        let mut total_reward = 0.0;
        let mut steps = 0;
        while steps < MAX_STEPS {
            let action = Action::ALL[agent.usize(0..Action::ALL.len())];
            let outcome = match world.move_snake(action) {
                Ok(outcome) => outcome,
                Err(err) => {
                    error!("episode {} aborted: {}", episode, err);
                    break;
                }
            };
            total_reward += outcome.reward;
            steps += 1;
            if outcome.done {
                break;
            }
        }

        info!(
            "episode {}: {} steps, length {}, return {:.2}, {:?}",
            episode,
            steps,
            world.snake().len(),
            total_reward,
            world.death_reason()
        );

        if episode + 1 == episodes {
            print!("{}", world.get_observation());
        }
    }
}
