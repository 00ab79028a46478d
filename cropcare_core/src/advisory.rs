//! Static extension contacts and reading material attached to reports.

use crate::types::CropType;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
    pub description: String,
}

fn contact(name: &str, phone: &str, email: &str, kind: &str) -> Contact {
    Contact {
        name: name.into(),
        phone: phone.into(),
        email: email.into(),
        kind: kind.into(),
    }
}

fn resource(title: &str, url: &str, description: &str) -> Resource {
    Resource {
        title: title.into(),
        url: url.into(),
        description: description.into(),
    }
}

/// National contacts, plus the regional office when the location is in Accra
pub fn emergency_contacts(location: &str) -> Vec<Contact> {
    let mut contacts = vec![
        contact(
            "Ghana Ministry of Food and Agriculture",
            "+233-302-663-396",
            "info@mofa.gov.gh",
            "Government Extension Service",
        ),
        contact(
            "CSIR - Plant Genetic Resources Research Institute",
            "+233-302-777-651",
            "pgrri@csir.gh",
            "Research Institute",
        ),
        contact(
            "Agricultural Development Bank",
            "+233-302-662-762",
            "info@adbghana.com",
            "Agricultural Finance",
        ),
    ];

    if location.to_lowercase().contains("accra") {
        contacts.push(contact(
            "Greater Accra Regional Agriculture Office",
            "+233-302-666-212",
            "accra.agric@mofa.gov.gh",
            "Regional Extension",
        ));
    }
    contacts
}

pub fn additional_resources(crop: CropType) -> Vec<Resource> {
    let mut resources = vec![
        resource(
            "Ghana Agricultural Information Network",
            "https://gain.org.gh",
            "Agricultural information and resources",
        ),
        resource(
            "CABI Crop Protection Compendium",
            "https://www.cabi.org/cpc",
            "Comprehensive pest and disease information",
        ),
        resource(
            "FAO Plant Health Portal",
            "http://www.fao.org/plant-health",
            "International plant health resources",
        ),
    ];

    match crop {
        CropType::Maize => resources.push(resource(
            "IITA Maize Research",
            "https://www.iita.org/cropsnew/maize/",
            "International Institute of Tropical Agriculture - Maize",
        )),
        CropType::Cassava => resources.push(resource(
            "IITA Cassava Research",
            "https://www.iita.org/cropsnew/cassava/",
            "International Institute of Tropical Agriculture - Cassava",
        )),
        CropType::Cashew | CropType::Tomato => {}
    }
    resources
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accra_gets_regional_office() {
        assert_eq!(emergency_contacts("Kumasi").len(), 3);
        let contacts = emergency_contacts("East Legon, ACCRA");
        assert_eq!(contacts.len(), 4);
        assert_eq!(contacts[3].kind, "Regional Extension");
    }

    #[test]
    fn test_crop_specific_resources() {
        assert_eq!(additional_resources(CropType::Cashew).len(), 3);
        let maize = additional_resources(CropType::Maize);
        assert_eq!(maize.len(), 4);
        assert!(maize[3].url.contains("maize"));
    }
}
