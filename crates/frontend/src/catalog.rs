use citymap_shared::geo::LatLng;
use citymap_shared::models::PointOfInterest;

/// The five fixed points of interest shown by the widget.
pub fn catalog() -> Vec<PointOfInterest> {
    vec![
        PointOfInterest {
            lat: 56.1567,
            lon: 10.2108,
            image: "/images/aarhus_cathedral.jpg".to_string(),
            name: "Aarhus Cathedral".to_string(),
            address: "Store Torv 1, 8000 Aarhus".to_string(),
            text: "Aarhus Cathedral, a historic landmark from the 12th century.".to_string(),
            icon: "\u{26ea}".to_string(),
        },
        PointOfInterest {
            lat: 56.1531,
            lon: 10.2048,
            image: "/images/aroos.jpg".to_string(),
            name: "ARoS Art Museum".to_string(),
            address: "Banegårdspladsen 1, 8000 Aarhus".to_string(),
            text: "ARoS Art Museum, known for its iconic rainbow panorama.".to_string(),
            icon: "\u{1f3a8}".to_string(),
        },
        PointOfInterest {
            lat: 56.1591,
            lon: 10.2017,
            image: "/images/old_town.jpg".to_string(),
            name: "The Old Town".to_string(),
            address: "Vestergade 27, 8000 Aarhus".to_string(),
            text: "The Old Town, an open-air museum of Danish history.".to_string(),
            icon: "\u{1f3d8}\u{fe0f}".to_string(),
        },
        PointOfInterest {
            lat: 56.1366,
            lon: 10.2133,
            image: "/images/marselisborg.jpg".to_string(),
            name: "Marselisborg Palace".to_string(),
            address: "Kongevejen 100, 8000 Aarhus".to_string(),
            text: "Marselisborg Palace, the summer residence of the Danish royal family."
                .to_string(),
            icon: "\u{1f3f0}".to_string(),
        },
        PointOfInterest {
            lat: 56.1701,
            lon: 10.1994,
            image: "/images/botanical_garden.jpg".to_string(),
            name: "Botanical Garden".to_string(),
            address: "Peter Holms Vej, 8000 Aarhus".to_string(),
            text: "Aarhus Botanical Garden, a serene green space.".to_string(),
            icon: "\u{1f33f}".to_string(),
        },
    ]
}

/// Coordinates of every catalog entry, in catalog order.
pub fn positions(entries: &[PointOfInterest]) -> Vec<LatLng> {
    entries.iter().map(|p| p.position()).collect()
}
