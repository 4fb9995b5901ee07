//! Human-readable rendering of a found chain, naming the person who connects
//! each consecutive pair of movies.

use anyhow::{bail, Result};
use protocol::{MovieId, PersonId, Provider};

pub async fn print_path(provider: &dyn Provider, path: &[MovieId]) -> Result<()> {
    if path.is_empty() {
        return Ok(());
    }

    let mut titles = Vec::with_capacity(path.len());
    for &movie in path {
        titles.push(provider.display_title(movie).await?.title);
    }

    println!("Starting from: {}", titles[0]);
    for (i, pair) in path.windows(2).enumerate() {
        let person = connection(provider, pair[0], pair[1]).await?;
        let name = provider.person_name(person).await?;
        println!("Through: {name}");
        println!("Connects to: {}", titles[i + 1]);
    }
    Ok(())
}

/// Find a person credited in both movies. Checks the smaller cast's
/// filmographies first, then the other direction, then falls back to a plain
/// cast intersection.
async fn connection(provider: &dyn Provider, left: MovieId, right: MovieId) -> Result<PersonId> {
    let mut left_cast = provider.persons_for_movie(left).await?;
    let mut right_cast = provider.persons_for_movie(right).await?;
    let mut left_movie = left;
    let mut right_movie = right;
    if left_cast.len() > right_cast.len() {
        std::mem::swap(&mut left_cast, &mut right_cast);
        std::mem::swap(&mut left_movie, &mut right_movie);
    }

    for &person in &left_cast {
        if provider
            .movies_for_person(person)
            .await?
            .contains(&right_movie)
        {
            return Ok(person);
        }
    }
    for &person in &right_cast {
        if provider
            .movies_for_person(person)
            .await?
            .contains(&left_movie)
        {
            return Ok(person);
        }
    }
    for &person in &left_cast {
        if right_cast.contains(&person) {
            return Ok(person);
        }
    }

    bail!("no shared credit between {left} and {right}")
}
