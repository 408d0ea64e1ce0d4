mod geojson_surface;

pub use geojson_surface::GeoJsonSurface;
