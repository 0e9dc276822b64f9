//! Output formatting for CLI commands.
//!
//! This module handles formatting output as either JSON or human-readable text.

use anyhow::Result;
use claimquery::{PlannedRequest, QueryAnswer};

const NOT_A_CLAIMS_QUERY: &str =
    "That doesn't look like a ranking or aggregation question about claims.";

/// Print a pipeline answer.
pub fn print_answer(answer: Option<&QueryAnswer>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
        return Ok(());
    }

    match answer {
        Some(answer) => {
            println!("{}", answer.answer);
            println!(
                "\n[{} query, {}ms]",
                answer.request.display_name(),
                answer.stats.total_time_ms
            );
        }
        None => println!("{NOT_A_CLAIMS_QUERY}"),
    }
    Ok(())
}

/// Print the request a question would issue.
pub fn print_plan(plan: Option<&PlannedRequest>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    let Some(plan) = plan else {
        println!("{NOT_A_CLAIMS_QUERY}");
        return Ok(());
    };

    println!("Pipeline:  {}", plan.display_name());
    match plan {
        PlannedRequest::Analytics(request) => {
            println!("Group by:  {}", request.group_by_field.as_str());
            println!("Function:  {}", request.metric_function.as_str());
            if let Some(field) = request.metric_field {
                println!("Field:     {}", field);
            }
            println!("Order:     {}", request.order.as_str());
            println!("Top:       {}", request.top_results);
        }
        PlannedRequest::Aggregation(request) => {
            println!("Field:     {}", request.field);
            println!("Function:  {}", request.aggregation_type.as_str());
            if let Some(filter) = &request.filter {
                println!("Filter:    {}", filter);
            }
        }
    }
    Ok(())
}
