use kpartition::*;
use rand::prelude::*;

fn main() -> Result<()> {
    env_logger::init();
    let (blob_cnt, per_blob, sample_dims) = (4, 250, 2);

    // Generate some blobs of random data around (0,0), (40,40), (80,80), ...
    let mut rnd = StdRng::seed_from_u64(42);
    let mut samples = vec![0.0f64; blob_cnt * per_blob * sample_dims];
    samples.chunks_exact_mut(per_blob * sample_dims).enumerate()
        .for_each(|(b, blob)| blob.iter_mut().for_each(|v| *v = 40.0 * b as f64 + rnd.gen_range(-15.0..15.0)));
    let points = points_from_row_major(&samples, blob_cnt * per_blob, sample_dims)?;

    // Seed every cluster with one sample of its blob
    let seeds: Vec<_> = points.iter().step_by(per_blob).cloned().collect();
    let result = k_mean(&points, &seeds, &KMeansConfig::default())?;

    println!("K-means result after {} passes:", result.passes());
    for cluster in result.iter() {
        println!("Cluster {}: center {} | {} members | inertia {:.2}",
            cluster.index() + 1, cluster.center(), cluster.len(), cluster.inertia()?);
    }
    println!("Error: {}", result.inertia()?);
    Ok(())
}
