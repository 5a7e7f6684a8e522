mod sim;

use std::{error::Error, path::PathBuf};

use clap::Parser;
use embassy_executor::{Executor, Spawner};
use embassy_net::{Config, Ipv4Address, Ipv4Cidr, Runner, StackResources};
use embassy_net_tuntap::TunTapDevice;
use heapless::Vec;
use rand_core::{OsRng, TryRngCore};
use rova_core::{
    mk_static,
    utils::{serve, BoardConfig, Controller, Duration, ServerConfig},
};
use static_cell::StaticCell;
use tracing::{error, info};

#[derive(Parser)]
#[clap(version = "1.0")]
struct Opts {
    /// TAP device name
    #[clap(long, default_value = "tap0")]
    tap: String,
    /// use a static IP instead of DHCP
    #[clap(long)]
    static_ip: bool,
    /// HTTP port
    #[clap(long, default_value_t = 80)]
    port: u16,
    /// drop a silent client after this many milliseconds
    #[clap(long)]
    read_timeout_ms: Option<u64>,
    /// JSON board description (pin map and speed presets)
    #[clap(long)]
    board: Option<PathBuf>,
}

#[embassy_executor::task]
async fn net_task(mut runner: Runner<'static, TunTapDevice>) -> ! {
    runner.run().await
}

#[embassy_executor::task]
async fn main_task(
    spawner: Spawner,
    device: TunTapDevice,
    static_ip: bool,
    board: BoardConfig,
    server: ServerConfig,
) {
    let drive = match sim::drive_group(&board.pins) {
        Ok(drive) => drive,
        Err(e) => {
            error!("motor init failed: {}", e);
            return;
        }
    };
    let mut controller = Controller::new(drive, board.speeds);

    let config = if static_ip {
        Config::ipv4_static(embassy_net::StaticConfigV4 {
            address: Ipv4Cidr::new(Ipv4Address::new(192, 168, 69, 2), 24),
            dns_servers: Vec::new(),
            gateway: Some(Ipv4Address::new(192, 168, 69, 1)),
        })
    } else {
        Config::dhcpv4(Default::default())
    };

    let mut seed_buf = [0; 8];
    if let Err(e) = OsRng.try_fill_bytes(&mut seed_buf) {
        error!("no OS randomness, using a fixed seed: {}", e);
    }
    let seed = u64::from_le_bytes(seed_buf);

    let (stack, runner) = embassy_net::new(
        device,
        config,
        mk_static!(StackResources<3>, StackResources::<3>::new()),
        seed,
    );
    spawner.spawn(net_task(runner)).unwrap();

    info!("Waiting for network configuration...");
    stack.wait_config_up().await;

    serve(stack, &mut controller, Some(&server)).await;
}

static EXECUTOR: StaticCell<Executor> = StaticCell::new();

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let board = match &opts.board {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => BoardConfig::default(),
    };
    let server = ServerConfig {
        port: opts.port,
        read_timeout: opts.read_timeout_ms.map(Duration::from_millis),
        ..ServerConfig::default()
    };
    let device = TunTapDevice::new(&opts.tap)?;
    info!(tap = %opts.tap, ?board, "starting mock controller");

    let executor = EXECUTOR.init(Executor::new());
    executor.run(move |spawner| {
        spawner
            .spawn(main_task(spawner, device, opts.static_ip, board, server))
            .unwrap();
    })
}
