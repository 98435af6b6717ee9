use clap::{Parser, Subcommand};

use ellipsoid_ups::{
    EllipsoidRegistry, Pole,
    ups::{parse_ups, to_ups, UpsOptions},
};

#[derive(Parser)]
#[command(name = "ups")]
#[command(about = "Convert between geodetic and Universal Polar Stereographic coordinates")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a latitude/longitude to UPS
    Forward {
        /// Latitude in degrees
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(allow_hyphen_values = true)]
        lon: f64,
        /// Project about this pole instead of the point's own
        #[arg(long)]
        pole: Option<Pole>,
        /// Ellipsoid name, see `ups list`
        #[arg(long, default_value = "WGS84")]
        ellipsoid: String,
        /// Leave out the 2,000 km false origin
        #[arg(long)]
        unfalsed: bool,
        /// Accept latitudes between the UPS limits
        #[arg(long)]
        lax: bool,
    },
    /// Convert a UPS string like "00Z N 2000000 1444543" to latitude/longitude
    Inverse {
        ups: String,
        /// Ellipsoid name, see `ups list`
        #[arg(long, default_value = "WGS84")]
        ellipsoid: String,
    },
    /// Print the parameters of an ellipsoid
    Ellipsoid {
        name: String,
    },
    /// List the standard ellipsoids
    List,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let registry = EllipsoidRegistry::standard();

    match cli.command {
        Commands::Forward {
            lat,
            lon,
            pole,
            ellipsoid,
            unfalsed,
            lax,
        } => {
            let ellipsoid = registry.lookup(&ellipsoid)?;
            let options = UpsOptions {
                pole,
                falsed: !unfalsed,
                strict: !lax,
            };
            let ups = to_ups(lat, lon, &ellipsoid, options)?;
            println!("{}", ups.to_str(3, true, true));
        }
        Commands::Inverse { ups, ellipsoid } => {
            let ellipsoid = registry.lookup(&ellipsoid)?;
            let ups = parse_ups(&ups, &ellipsoid, true)?;
            println!("{} {} {}", ups.to_latlon(), ups.convergence(), ups.scale());
        }
        Commands::Ellipsoid { name } => {
            println!("{}", registry.lookup(&name)?);
        }
        Commands::List => {
            for name in registry.names() {
                println!("{name}");
            }
        }
    }

    Ok(())
}
