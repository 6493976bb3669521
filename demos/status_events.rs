use kpartition::*;
use rand::prelude::*;

fn main() -> Result<()> {
    env_logger::init();
    let (sample_cnt, sample_dims, k) = (20000, 8, 6);

    // Generate some random data
    let mut rnd = StdRng::seed_from_u64(1337);
    let mut samples = vec![0.0f64; sample_cnt * sample_dims];
    samples.iter_mut().for_each(|v| *v = rnd.gen());
    let points = points_from_row_major(&samples, sample_cnt, sample_dims)?;
    let seeds: Vec<_> = points.choose_multiple(&mut rnd, k).cloned().collect();

    let conf = KMeansConfig::build()
        .pass_done(&|nr, centers: &[Point<f64>], means: &[Point<f64>]| {
            let shift = centers.iter().zip(means.iter())
                .filter_map(|(c, m)| distance(c, m).ok())
                .fold(0.0, f64::max);
            println!("Pass {} - largest center shift: {:.6}", nr, shift);
        })
        .empty_cluster_policy(EmptyClusterPolicy::RetainCenter)
        .pass_limit(PassLimit::AtMost(1000))
        .parallel(true)
        .build();

    let result = k_mean(&points, &seeds, &conf)?;

    println!("Centers: {:?}", result.centers().iter().map(|c| c.to_string()).collect::<Vec<_>>());
    println!("Cluster sizes: {:?}", result.iter().map(|c| c.len()).collect::<Vec<_>>());
    println!("Error: {}", result.inertia()?);
    Ok(())
}
