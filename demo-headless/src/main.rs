use clap::Parser;
use tracing_subscriber::EnvFilter;
use unitvec_core::unit::catalog;
use unitvec_core::{QuantityVector, StorageType, UnitRef, UnitRegistry, ValueError};

/// Quantity vector demo with configurable values and units
#[derive(Parser, Debug)]
#[command(name = "unitvec-demo")]
#[command(about = "Build a quantity vector and print what the engine derives from it", long_about = None)]
struct Args {
    /// Raw values in the chosen unit
    #[arg(required = true, allow_negative_numbers = true)]
    values: Vec<f64>,

    /// Unit abbreviation (m, km, ft, s, h, kg, N, J, K, dC, ...)
    #[arg(short, long, default_value = "m")]
    unit: String,

    /// Storage layout (dense, sparse)
    #[arg(short, long, default_value = "dense")]
    storage: String,

    /// Also print the values in this unit
    #[arg(short, long)]
    target: Option<String>,

    /// Print mutability, kind and storage tags
    #[arg(short, long)]
    verbose: bool,
}

/// Catalog units selectable from the command line
fn unit_by_abbreviation(abbreviation: &str) -> Option<UnitRef> {
    let unit = match abbreviation {
        "m" => &catalog::METER,
        "km" => &catalog::KILOMETER,
        "mm" => &catalog::MILLIMETER,
        "ft" => &catalog::FOOT,
        "in" => &catalog::INCH,
        "mi" => &catalog::MILE,
        "pos" => &catalog::POSITION_METER,
        "m2" => &catalog::SQUARE_METER,
        "ha" => &catalog::HECTARE,
        "kg" => &catalog::KILOGRAM,
        "g" => &catalog::GRAM,
        "lb" => &catalog::POUND,
        "s" => &catalog::SECOND,
        "min" => &catalog::MINUTE,
        "h" => &catalog::HOUR,
        "m/s" => &catalog::METER_PER_SECOND,
        "km/h" => &catalog::KILOMETER_PER_HOUR,
        "N" => &catalog::NEWTON,
        "J" => &catalog::JOULE,
        "kWh" => &catalog::KILOWATT_HOUR,
        "W" => &catalog::WATT,
        "K" => &catalog::ABSOLUTE_KELVIN,
        "dC" => &catalog::ABSOLUTE_CELSIUS,
        "dF" => &catalog::ABSOLUTE_FAHRENHEIT,
        "$" => &catalog::MONEY,
        _ => return None,
    };
    Some(UnitRef::clone(unit))
}

fn run(args: &Args) -> Result<(), ValueError> {
    let storage: StorageType = args.storage.parse()?;
    let unit = unit_by_abbreviation(&args.unit)
        .ok_or_else(|| ValueError::InvalidInput(format!("Unknown unit '{}'", args.unit)))?;

    let vector = QuantityVector::new(&args.values, &unit, storage)?;
    println!("=== Quantity Vector Demo ===\n");
    println!("Vector:      {}", vector.to_string_verbose(args.verbose, true));
    println!("Quantity:    {} ({})", unit.quantity(), unit.dimensions());
    println!("Size:        {}", vector.size());
    println!("Cardinality: {}", vector.cardinality());
    println!("zSum (SI):   {}", vector.z_sum());

    if let Some(target) = &args.target {
        let target = unit_by_abbreviation(target)
            .ok_or_else(|| ValueError::InvalidInput(format!("Unknown unit '{target}'")))?;
        println!("In {}:       {}", target, vector.to_string_with(&target, false, true)?);
    }

    let other = match storage {
        StorageType::Dense => vector.to_sparse(),
        StorageType::Sparse => vector.to_dense(),
    };
    println!(
        "As {:<8}   {}",
        other.storage_type().to_string(),
        other.to_string_verbose(args.verbose, true)
    );

    match vector.times(&vector) {
        Ok(square) => {
            let registry = UnitRegistry::global();
            println!(
                "Squared:     {} ({} units cached)",
                square.to_string_verbose(args.verbose, true),
                registry.len()
            );
        }
        Err(err) => println!("Squared:     not defined ({err})"),
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
