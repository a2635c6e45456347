use geoiters_rs::{Extent, GeoItersError, GridConfig, TileIndexIterator, UniformGridIterator};

fn main() -> Result<(), GeoItersError> {
    env_logger::init();

    let ext = Extent::with_crs(-74.2, 40.65, -73.7, 40.85, "EPSG:4326");
    println!("Extent: {}", ext);
    println!("Area: {:.0} m²", ext.area()?);

    for (i, patch) in UniformGridIterator::new(ext.copy(), 4, 4)?.enumerate() {
        println!("Patch {}: {}", i + 1, patch);
    }

    let grid = GridConfig::new().patch_max_area(25_000_000.0).build(ext.copy())?;
    println!(
        "5 km x 5 km patches: {} rows x {} columns",
        grid.rows(),
        grid.columns()
    );

    for (i, (x, y, z)) in TileIndexIterator::new(&ext, 11)?.enumerate() {
        let tile = Extent::from_tile_coordinates(x, y, z)?;
        println!("Tile {} ({}/{}/{}), Area {:.3} m², {}", i + 1, z, x, y, tile.area()?, tile);
    }

    Ok(())
}
