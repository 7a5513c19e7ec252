pub mod city;
pub mod search;
