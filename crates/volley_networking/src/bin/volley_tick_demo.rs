//! # Volley Tick Demo
//!
//! Runs a tick loop against the in-memory host while worker threads fire
//! effect batches at it, then prints what reached the host.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=volley_networking=debug cargo run -p volley_networking --features demo --bin volley_tick_demo -- \
//!     --tick-rate 20 --duration 5 --workers 4
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing_subscriber::EnvFilter;
use volley_networking::scheduler::tick::DEFAULT_TICK_RATE;
use volley_networking::{
    Dispatch, EffectDispatcher, EffectsConfig, Emitter, HostCall, MockEffectHost, TaskQueue, TickLoop,
};
use volley_shared::{
    BlockCrack, BlockPos, BulletTrail, Color, DustOptions, EffectDescriptor, ExplosionEffect, EyeLocation,
    ParticleKind, ParticlePacket, Recoil, SoundPacket, Vec3,
};

const WORLD: u32 = 0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         VOLLEY TICK DEMO                                         ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let args: Vec<String> = std::env::args().collect();
    let mut tick_rate = DEFAULT_TICK_RATE;
    let mut duration_secs = 3u64;
    let mut workers = 4usize;
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--tick-rate" | "-t" => {
                if i + 1 < args.len() {
                    tick_rate = args[i + 1].parse().unwrap_or(DEFAULT_TICK_RATE);
                    i += 1;
                }
            }
            "--duration" | "-d" => {
                if i + 1 < args.len() {
                    duration_secs = args[i + 1].parse().unwrap_or(3);
                    i += 1;
                }
            }
            "--workers" | "-w" => {
                if i + 1 < args.len() {
                    workers = args[i + 1].parse().unwrap_or(4);
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Usage: volley_tick_demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -t, --tick-rate <RATE>     Tick rate in Hz (default: 20)");
                println!("  -d, --duration <SECS>      Run for N seconds (default: 3)");
                println!("  -w, --workers <NUM>        Gameplay threads firing effects (default: 4)");
                println!("  -c, --config <PATH>        Effects config TOML file");
                println!("  -h, --help                 Show this help");
                return;
            }
            _ => {}
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => match EffectsConfig::load(&path) {
            Ok(config) => config,
            Err(error) => {
                tracing::error!(%path, %error, "failed to load config");
                std::process::exit(1);
            }
        },
        None => EffectsConfig::default(),
    };

    println!("┌─ CONFIGURATION ─────────────────────────────────────────────────┐");
    println!("│ Tick Rate:          {} Hz", tick_rate);
    println!("│ Duration:           {} seconds", duration_secs);
    println!("│ Workers:            {}", workers);
    println!("│ Crack Radius:       {}", config.block_crack_radius);
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    let host = Arc::new(MockEffectHost::new());
    for client in 0..8u64 {
        let eye = EyeLocation {
            position: Vec3::new(client as f64 * 12.0, 65.62, 0.0),
            yaw: 0.0,
            pitch: 0.0,
        };
        host.add_player(WORLD, client, eye, 0);
    }

    let queue = TaskQueue::for_thread(thread::current().id(), config.scheduler.queue_capacity);
    let dispatcher = Arc::new(EffectDispatcher::new(
        Emitter::new(Arc::clone(&host), config),
        queue.clone(),
    ));

    let running = Arc::new(AtomicBool::new(true));
    let dispatched = Arc::new(AtomicU64::new(0));
    let handles: Vec<_> = (0..workers)
        .map(|worker| {
            let dispatcher = Arc::clone(&dispatcher);
            let running = Arc::clone(&running);
            let dispatched = Arc::clone(&dispatched);
            thread::spawn(move || {
                let mut shot = 0u64;
                while running.load(Ordering::Relaxed) {
                    if dispatcher.dispatch(shot_batch(worker as u64, shot)) == Dispatch::Deferred {
                        dispatched.fetch_add(1, Ordering::Relaxed);
                    }
                    shot += 1;
                    thread::sleep(Duration::from_millis(10));
                }
            })
        })
        .collect();

    let mut tick_loop = TickLoop::new(tick_rate);
    let start = Instant::now();
    while start.elapsed() < Duration::from_secs(duration_secs) {
        tick_loop.wait_for_next_tick();
        while tick_loop.should_tick() {
            tick_loop.run_tick(&queue);
        }
    }

    running.store(false, Ordering::Relaxed);
    for handle in handles {
        if handle.join().is_err() {
            tracing::error!("worker thread panicked");
        }
    }
    // Drain what the workers queued after the last tick.
    tick_loop.run_tick(&queue);

    let calls = host.calls();
    let particles = calls.iter().filter(|c| matches!(c, HostCall::Particle { .. })).count();
    let sounds = calls.iter().filter(|c| matches!(c, HostCall::Sound { .. })).count();
    let packets = calls.iter().filter(|c| matches!(c, HostCall::Packet { .. })).count();
    let stats = tick_loop.stats();

    println!("┌─ RESULTS ───────────────────────────────────────────────────────┐");
    println!("│ Ticks:              {}", tick_loop.tick_count());
    println!("│ Batches Deferred:   {}", dispatched.load(Ordering::Relaxed));
    println!("│ Tasks Run:          {}", stats.tasks_run);
    println!("│ Particle Spawns:    {}", particles);
    println!("│ Sounds Played:      {}", sounds);
    println!("│ Packets Sent:       {}", packets);
    println!("│ Avg Tick:           {} us", stats.avg_tick_us);
    println!("│ Max Tick:           {} us", stats.max_tick_us);
    println!("│ Late Ticks:         {}", stats.late_ticks);
    println!("└──────────────────────────────────────────────────────────────────┘");
}

/// One shot's worth of feedback from `client`.
fn shot_batch(client: u64, shot: u64) -> Vec<EffectDescriptor> {
    let muzzle = Vec3::new(client as f64 * 12.0, 65.62, 0.0);
    let direction = Vec3::from_rotation((shot % 360) as f32, 0.0);
    let impact = muzzle + direction * 20.0;

    let mut batch = vec![
        SoundPacket {
            sound: "custom.rifle.shoot".to_owned(),
            world: WORLD,
            position: muzzle,
            volume: 1.0,
            pitch: 1.0,
        }
        .into(),
        BulletTrail {
            world: WORLD,
            particle: ParticleKind::Dust,
            dust: Some(DustOptions::new(Color::from_rgb(255, 200, 80), 0.6)),
            start: muzzle,
            direction,
            length: 20.0,
            net_distance: 0.0,
            min_distance: 1.0,
            spacing: 0.5,
            force: false,
        }
        .into(),
        Recoil { client, horizontal: 0.4, vertical: -1.2 }.into(),
        BlockCrack {
            world: WORLD,
            entity_id: client as i32,
            block: BlockPos::new(impact.x.floor() as i32, impact.y.floor() as i32, impact.z.floor() as i32),
            stage: (shot % 10) as i32,
        }
        .into(),
    ];

    if shot % 25 == 0 {
        let explosion = ExplosionEffect {
            particles: ParticlePacket::placeholder_explosion(),
            world: WORLD,
            position: impact,
            force: true,
        };
        batch.push(EffectDescriptor::TransExplosion(explosion));
    }
    batch
}
