use geokmeans::*;
use rand::prelude::*;

fn main() {
    // Four groups of points around European capitals
    let capitals = [(52.52, 13.40), (48.85, 2.35), (41.90, 12.50), (40.42, -3.70)];
    let mut rnd = StdRng::seed_from_u64(2024);
    let mut coordinates = Vec::new();
    for &(lat, lon) in capitals.iter() {
        for _ in 0..250 {
            coordinates.push((lat + rnd.gen_range(-0.2, 0.2), lon + rnd.gen_range(-0.2, 0.2)));
        }
    }

    let conf = KMeansConfig::build()
        .init_done(&|centroids| println!("Initialization completed: {} centroids.", centroids.len()))
        .iteration_done(&|nr, centroids, change|
            println!("Iteration {} - {} centroids | Change: {:.4}", nr, centroids.len(), change))
        .random_generator(rnd)
        .build();

    let kmean = KMeans::from_coordinates(coordinates).unwrap();
    let result = kmean.kmeans_lloyd(4, KMeans::init_random_sample, &conf).unwrap();

    println!("Centroids: {:?}", result.centroids);
    println!("SSE: {}", result.sse);
}
