//! Player Locomotion
//!
//! This example drives the Idle/Walk machine with a scripted stream of input
//! frames, the way a game loop would.
//!
//! Key concepts:
//! - Input sampled once per frame and fed to `drive`
//! - Transitions queued by the states themselves, applied at end of tick
//! - Trigger contacts forwarded to whichever state is active
//! - Checkpointing the machine mid-session
//!
//! Run with: cargo run --example player_locomotion

use stance::config::MachineConfig;
use stance::locomotion::{Contact, InputState, Locomotion};
use stance::StateKey;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Player Locomotion ===\n");

    let mut player = Locomotion::new(MachineConfig::named("player"))?;
    player.start()?;
    println!("Started in {}", player.gait().name());

    let script = [false, true, true, true, false, false, true, false];
    let doorway = Contact { id: 1 };

    for (frame, &walk_held) in script.iter().enumerate() {
        if frame == 2 {
            player.trigger_enter(&doorway)?;
            println!("  frame {frame}: entered doorway trigger");
        }
        if frame == 5 {
            player.trigger_exit(&doorway)?;
            println!("  frame {frame}: left doorway trigger");
        }

        let before = player.gait();
        player.drive(&InputState { walk_held })?;
        let after = player.gait();

        if before != after {
            println!(
                "  frame {frame}: W {} -> {} => {}",
                if walk_held { "held" } else { "released" },
                before.name(),
                after.name()
            );
        } else {
            println!("  frame {frame}: {}", after.name());
        }
    }

    let body = player.body();
    println!("\nSummary:");
    println!("  idle ticks: {}, walk ticks: {}", body.idle_ticks, body.walk_ticks);
    println!(
        "  idle entries: {}, walk entries: {}",
        body.idle_entries, body.walk_entries
    );
    println!("  overlapping contacts: {}", body.overlaps.len());

    let path: Vec<&str> = player
        .machine()
        .history()
        .get_path()
        .into_iter()
        .map(|gait| gait.name())
        .collect();
    println!("  path: {}", path.join(" -> "));

    let checkpoint = player.machine().checkpoint();
    println!("\nCheckpoint:\n{}", checkpoint.to_json()?);

    println!("\n=== Example Complete ===");
    Ok(())
}
