use crate::models::{City, Doctor, Hospital, Region};
use crate::services::directory::LocationDirectory;

/// Builds the reference catalog the resolver serves. Mirrors the production
/// seed set: ten regions with their cities, the national hospital roster and
/// a doctor pool assigned round-robin across hospitals.
pub fn seeded_directory() -> LocationDirectory {
    let region_data: &[(&str, &[&str])] = &[
        ("Maharashtra", &["Mumbai", "Pune", "Nagpur", "Nashik"]),
        ("Delhi", &["New Delhi", "Dwarka", "Rohini"]),
        ("Karnataka", &["Bangalore", "Mysore", "Mangalore"]),
        ("Tamil Nadu", &["Chennai", "Coimbatore", "Madurai"]),
        ("Uttar Pradesh", &["Lucknow", "Noida", "Varanasi"]),
        ("Gujarat", &["Ahmedabad", "Surat", "Vadodara"]),
        ("Rajasthan", &["Jaipur", "Udaipur", "Jodhpur"]),
        ("West Bengal", &["Kolkata", "Howrah", "Siliguri"]),
        ("Telangana", &["Hyderabad", "Warangal", "Nizamabad"]),
        ("Kerala", &["Kochi", "Thiruvananthapuram", "Kozhikode"]),
    ];

    let mut regions = Vec::new();
    let mut cities = Vec::new();
    let mut city_id = 0i64;
    for (idx, (region_name, region_cities)) in region_data.iter().enumerate() {
        let region_id = idx as i64 + 1;
        regions.push(Region {
            id: region_id,
            name: (*region_name).to_string(),
        });
        for city_name in region_cities.iter() {
            city_id += 1;
            cities.push(City {
                id: city_id,
                name: (*city_name).to_string(),
                region_id,
            });
        }
    }

    // (name, region, city, type, rating, emergency, insurance)
    let hospital_data: &[(&str, &str, &str, &str, f32, bool, bool)] = &[
        ("Apollo Hospital", "Maharashtra", "Mumbai", "Private", 4.5, true, true),
        ("Fortis Healthcare", "Delhi", "New Delhi", "Private", 4.3, true, true),
        ("AIIMS Delhi", "Delhi", "New Delhi", "Government", 4.8, true, true),
        ("Manipal Hospital", "Karnataka", "Bangalore", "Private", 4.4, true, true),
        ("Christian Medical College", "Tamil Nadu", "Chennai", "Private", 4.6, true, true),
        ("King George's Medical University", "Uttar Pradesh", "Lucknow", "Government", 4.2, true, true),
        ("Kokilaben Hospital", "Maharashtra", "Mumbai", "Private", 4.7, true, true),
        ("Narayana Health", "Karnataka", "Bangalore", "Private", 4.5, true, true),
        ("Medanta Hospital", "Delhi", "Dwarka", "Private", 4.6, true, true),
        ("Ruby Hall Clinic", "Maharashtra", "Pune", "Private", 4.3, true, true),
        ("Sanjay Gandhi Hospital", "Uttar Pradesh", "Lucknow", "Government", 4.1, true, false),
        ("Amrita Hospital", "Kerala", "Kochi", "Private", 4.5, true, true),
    ];

    let hospitals: Vec<Hospital> = hospital_data
        .iter()
        .enumerate()
        .map(|(idx, (name, region, city, hospital_type, rating, emergency, insurance))| Hospital {
            id: idx as i64 + 1,
            name: (*name).to_string(),
            region: (*region).to_string(),
            city: (*city).to_string(),
            hospital_type: (*hospital_type).to_string(),
            rating: Some(*rating),
            emergency_24x7: *emergency,
            insurance_supported: *insurance,
            website_url: None,
            image_url: None,
        })
        .collect();

    // (name, degree, specialization, experience years, rating, past experience)
    let doctor_data: &[(&str, &str, &str, i32, f32, &str)] = &[
        ("Dr. Rajesh Kumar", "MD, DM Cardiology", "Cardiology", 15, 4.8,
         "Senior Cardiovascular Surgeon at AIIMS for 10 years."),
        ("Dr. Priya Sharma", "MBBS, MD Dermatology", "Dermatology", 12, 4.7,
         "Consultant Dermatologist with expertise in cosmetic procedures."),
        ("Dr. Amit Patel", "MS, MCh Neurosurgery", "Neurology", 20, 4.9,
         "Head of Neurosurgery, specializing in minimally invasive spine surgery."),
        ("Dr. Sneha Reddy", "MS Orthopedics", "Orthopedics", 10, 4.5,
         "Orthopedic Surgeon focusing on sports injuries and joint replacement."),
        ("Dr. Vikram Singh", "MD Pediatrics", "Pediatrics", 18, 4.8,
         "Renowned Pediatrician with 15 years in child critical care."),
        ("Dr. Anita Desai", "MS Ophthalmology", "Ophthalmology", 14, 4.6,
         "Eye Surgeon with over 5000 successful cataract surgeries."),
        ("Dr. Suresh Nair", "MS ENT", "ENT", 16, 4.5,
         "ENT Specialist known for advanced sinus and ear surgeries."),
        ("Dr. Meena Iyer", "DM Gastroenterology", "Gastroenterology", 11, 4.7,
         "Expert in endoscopic procedures and liver diseases."),
        ("Dr. Rahul Mehta", "DM Pulmonology", "Pulmonology", 13, 4.6,
         "Pulmonologist specializing in asthma, COPD, and sleep apnea."),
        ("Dr. Kavita Joshi", "DM Oncology", "Oncology", 22, 4.9,
         "Senior Oncologist with extensive experience in chemotherapy and immunotherapy."),
        ("Dr. Arjun Menon", "MD Psychiatry", "Psychiatry", 9, 4.4,
         "Psychiatrist focusing on anxiety disorders and cognitive behavioral therapy."),
        ("Dr. Deepika Gupta", "MBBS, MD", "General Medicine", 8, 4.3,
         "Primary Care Physician dedicated to preventive healthcare."),
        ("Dr. Sanjay Verma", "MD, DM Cardiology", "Cardiology", 25, 5.0,
         "Chief Cardiologist, pioneer in pediatric heart surgery in the region."),
        ("Dr. Nisha Kapoor", "MBBS, MD Dermatology", "Dermatology", 7, 4.2,
         "Dermatologist with a focus on pediatric skin conditions."),
        ("Dr. Manoj Tiwari", "MS, MCh Neurosurgery", "Neurology", 19, 4.8,
         "Neurosurgeon with expertise in brain tumor removal and stroke management."),
        ("Dr. Pooja Agarwal", "MS Orthopedics", "Orthopedics", 11, 4.5,
         "Orthopedic specialist in hand and upper extremity surgery."),
        ("Dr. Rohit Khanna", "MD Pediatrics", "Pediatrics", 14, 4.7,
         "Pediatrician with special interest in neonatology."),
        ("Dr. Swati Mishra", "DM Gastroenterology", "Gastroenterology", 16, 4.6,
         "Gastroenterologist specializing in inflammatory bowel diseases."),
        ("Dr. Ashok Banerjee", "DM Pulmonology", "Pulmonology", 21, 4.9,
         "Pulmonologist and Critical Care specialist."),
        ("Dr. Lakshmi Pillai", "MD, DM Cardiology", "Cardiology", 17, 4.8,
         "Interventional Cardiologist with high success rate in angioplasty."),
    ];

    let doctors: Vec<Doctor> = doctor_data
        .iter()
        .enumerate()
        .map(|(idx, (name, degree, specialization, experience, rating, past))| Doctor {
            id: idx as i64 + 1,
            name: (*name).to_string(),
            degree: (*degree).to_string(),
            specialization: (*specialization).to_string(),
            experience_years: *experience,
            hospital_id: hospitals[idx % hospitals.len()].id,
            rating: Some(*rating),
            past_experience: Some((*past).to_string()),
            image_url: None,
        })
        .collect();

    LocationDirectory::new(regions, cities, hospitals, doctors)
}
