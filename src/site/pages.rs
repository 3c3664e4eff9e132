//! The four dashboard pages and the figures on them.

use anyhow::Result;

use super::{Page, Site};
use crate::chart::{DistrictMap, FacetGrid, LineChart};
use crate::data::{Dataset, columns};
use crate::types::EventWindow;

/// Assemble the whole dashboard from the loaded reference data.
pub fn build_site(data: &Dataset) -> Result<Site> {
    let mut site = Site::new("Dogs in Zurich");
    site.add_page(intro_page());
    site.add_page(trends_page(data)?);
    site.add_page(district_page(data)?);
    site.add_page(year_2023_page(data)?);
    Ok(site)
}

fn intro_page() -> Page {
    let mut page = Page::new("index", "Introduction");
    page.add_heading("Trends in Urban Population: Dogs in Zurich");
    page.add_text(
        "This dashboard is built on the open dataset of the municipal dog register of the \
         city of Zurich. It contains information on dogs and their owners since 2015: age \
         group, gender and statistical district of residence for the owners, and breed, \
         breed type, sex, year of birth, age and color for each dog. The register is kept \
         by the Dog Control Department of the Zurich City Police.",
    );
    page.add_text(
        "The following pages look at how the dog population developed between 2015 and \
         2024, how it differs between the twelve Stadtkreise (boroughs), and what the \
         most recent complete year, 2023, looks like on the city map.",
    );
    page
}

fn trends_page(data: &Dataset) -> Result<Page> {
    let mut page = Page::new("trends", "First Impressions");
    page.add_text(
        "The number of registered dogs has grown steadily over the last decade. The green \
         band marks the pandemic years, which gave the register a visible push: more people \
         at home meant more newly registered dogs.",
    );

    let dogs = LineChart::new(columns::YEAR, columns::DOGS_TOTAL)
        .window(EventWindow::covid())
        .title("Registered Dogs in Zurich (2015 - 2024)")
        .x_title("Year")
        .y_title("Count")
        .build(&data.annual)?;
    page.add_plot(&dogs);

    page.add_text(
        "Dog owners follow the same trajectory, with slightly fewer owners than dogs in \
         every year. Some households keep more than one dog.",
    );

    let owners = LineChart::new(columns::YEAR, columns::OWNERS_TOTAL)
        .window(EventWindow::covid())
        .title("Registered Dog Owners in Zurich (2015 - 2024)")
        .x_title("Year")
        .y_title("Count")
        .build(&data.annual)?;
    page.add_plot(&owners);

    page.add_table(&data.annual)?;
    Ok(page)
}

fn district_page(data: &Dataset) -> Result<Page> {
    let mut page = Page::new("stadtkreis", "Dog Population per Stadtkreis");
    page.add_heading("Development of Dog Population per Stadtkreis");
    page.add_text(
        "The following plots show the development of the dog population in Zurich per \
         Stadtkreis over the years 2015 - 2024. The pandemic is visible here as well, but \
         it played out differently across the boroughs over 2020 and 2021.",
    );

    let per_district = LineChart::new(columns::YEAR, columns::DOGS_PER_DISTRICT)
        .grouped_by(columns::DISTRICT_CODE)
        .window(EventWindow::covid())
        .title("Absolute Number of Dogs in Zurich per Stadtkreis (2015 - 2024)")
        .x_title("Year")
        .y_title("Count")
        .legend_title("Stadtkreis")
        .size(900, 800)
        .build(&data.district_annual)?;
    page.add_plot(&per_district);

    page.add_text(
        "Growth rates make the differences easier to compare. Each panel below shows one \
         Stadtkreis on a shared axis range, so a flat line in one borough can be read \
         against a spike in another.",
    );

    let growth = FacetGrid::new(columns::YEAR, columns::GROWTH_RATE, columns::DISTRICT_CODE)
        .shape(4, 3)
        .panel_prefix("Stadtkreis ")
        .window(EventWindow::covid())
        .title("Annual Growth Rate of Number of Dogs in Each Stadtkreis (2015 - 2024)")
        .x_title("Year")
        .y_title("Annual Growth Rate")
        .build(&data.district_annual)?;
    page.add_plot(&growth);

    page.add_table(&data.district_annual)?;
    Ok(page)
}

fn year_2023_page(data: &Dataset) -> Result<Page> {
    let mut page = Page::new("year-2023", "Dog Population in the Year 2023");
    page.add_heading("Dog Population for the Year 2023 per Stadtkreis");
    page.add_text(
        "While absolute numbers give a good first impression, ratios such as dogs per \
         square kilometer or dogs per 1000 inhabitants make the boroughs comparable. The \
         maps below show the most recent complete year, 2023.",
    );

    let absolute = DistrictMap::new(columns::DOGS_TOTAL)
        .title("Absolute Number of Dogs per Stadtkreis")
        .build(&data.district_2023, &data.shapes)?;
    page.add_plot(&absolute);

    page.add_text(
        "Stadtkreis 11 has the most registered dogs in absolute numbers, followed by \
         Stadtkreis 7 and 9. Central Zurich keeps rather few registered dogs, but it \
         makes sense to normalize before reading too much into that.",
    );

    let per_km2 = DistrictMap::new(columns::DOGS_PER_KM2)
        .title("Dogs Per SQKM For Each Stadtkreis")
        .build(&data.district_2023, &data.shapes)?;
    page.add_plot(&per_km2);

    page.add_text(
        "In relation to area the picture flips: the dense central boroughs lead, and \
         Stadtkreis 11 drops to fourth place. One more normalization, this time by \
         population.",
    );

    let per_capita = DistrictMap::new(columns::DOGS_PER_1000)
        .title("Dogs Per 1000 Inhabitants For Each Stadtkreis")
        .build(&data.district_2023, &data.shapes)?;
    page.add_plot(&per_capita);

    page.add_text(
        "Stadtkreis 7, 8 and 2 keep the most registered dogs per 1000 inhabitants. \
         Stadtkreis 7 has the biggest area of all boroughs while holding about half the \
         inhabitants of Stadtkreis 11, which suggests smaller apartment houses, plenty of \
         single-family homes, and families with dogs.",
    );

    page.add_table(&data.district_2023)?;
    Ok(page)
}
