//! Example: Building a hierarchical model diagram
//!
//! This example builds a classic partially-pooled regression PGM
//! programmatically and writes it to `hierarchical_model.svg`.

use plateau::{
    Pgm,
    model::{Node, Plate},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building hierarchical model diagram...\n");

    let pgm = Pgm::new()
        // Population-level parameters
        .with_node(Node::latent(r"$\mu$").at(1.0, 3.0).with_edge_to("theta_j"))
        .with_node(Node::latent(r"$\tau$").right_of("mu").with_edge_to("theta_j"))
        .with_node(Node::hyper(r"$\alpha$").above("mu"))
        .with_node(Node::hyper(r"$\beta$").above("tau"))
        // Group-level coefficients, repeated per group
        .with_plate(
            Plate::new("$j = 1..J$")
                .with_node(
                    Node::latent(r"$\theta_j$")
                        .below("mu")
                        .shifted(0.4, 0.0)
                        .with_edge_to("y_ij"),
                )
                .with_node_ref("y_ij"),
        )
        // Observations, repeated per measurement within each group
        .with_plate(
            Plate::new("$i = 1..n_j$")
                .with_node(Node::data("$y_{i, j}$").below("theta_j"))
                .with_node(Node::param(r"$\sigma^2$").right_of("y_ij")),
        );

    let svg = pgm.render_svg()?;
    std::fs::write("hierarchical_model.svg", &svg)?;

    println!("Wrote hierarchical_model.svg ({} bytes)", svg.len());
    for (from, to) in pgm.build()?.edges() {
        println!("  edge: {from} -> {to}");
    }

    Ok(())
}
